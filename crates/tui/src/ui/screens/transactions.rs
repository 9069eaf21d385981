use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use api_types::transaction::Transaction;

use crate::{
    app::{AppState, TxField, TxForm, TxMode},
    ui::{centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    render_header(frame, layout[0], state, &theme);
    render_list(frame, layout[1], state, &theme);

    match state.transactions.mode {
        TxMode::Create => render_form(frame, area, &state.transactions.form, &theme),
        TxMode::EditCategory => render_category_edit(frame, area, state, &theme),
        TxMode::Upload => render_upload(frame, area, state, &theme),
        TxMode::ConfirmDelete => render_confirm(frame, area, &theme),
        TxMode::List => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut line = vec![
        Span::styled("Kayıt", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", state.transactions.items.len())),
        Span::styled("Dönem", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}", state.filter.label())),
    ];

    if let Some(err) = &state.transactions.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("İşlemler");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .transactions
        .items
        .iter()
        .map(|tx| ListItem::new(Line::from(row_spans(tx, theme))))
        .collect::<Vec<_>>();

    if items.is_empty() {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "İşlem yok. `n` ile ekleyin, `u` ile dosya yükleyin.",
                Style::default().fg(theme.dim),
            ))
            .block(block),
            area,
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.transactions.selected));

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}

fn row_spans(tx: &Transaction, theme: &Theme) -> Vec<Span<'static>> {
    let amount_color = match tx.direction {
        api_types::Direction::In => theme.positive,
        api_types::Direction::Out => theme.negative,
    };
    let sign = match tx.direction {
        api_types::Direction::In => "+",
        api_types::Direction::Out => "-",
    };
    let category = tx
        .category
        .as_deref()
        .map(|c| format!("#{c} "))
        .unwrap_or_default();
    let description: String = tx.description.chars().take(40).collect();

    vec![
        Span::styled(format!("{}  ", tx.date), Style::default().fg(theme.dim)),
        Span::styled(
            format!("{sign}{:<14}", tx.amount.to_string()),
            Style::default().fg(amount_color),
        ),
        Span::styled(category, Style::default().fg(theme.accent)),
        Span::styled(format!("{description:<42}"), Style::default().fg(theme.text)),
        Span::styled(tx.source.clone(), Style::default().fg(theme.text_muted)),
    ]
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &TxForm, theme: &Theme) {
    let card_area = centered_box(52, 11, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Yeni işlem ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let field = |label: &str, value: String, focused: bool, hint: &str| -> Line<'static> {
        let style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        let mut spans = vec![
            Span::styled(
                format!("{label:<12}"),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled(value, style),
        ];
        if focused {
            spans.push(Span::styled("│", style));
            if !hint.is_empty() {
                spans.push(Span::styled(
                    format!("  {hint}"),
                    Style::default().fg(theme.dim),
                ));
            }
        }
        Line::from(spans)
    };

    let mut lines = vec![
        field(
            "Tarih",
            form.date.clone(),
            form.focus == TxField::Date,
            "YYYY-AA-GG",
        ),
        field(
            "Açıklama",
            form.description.clone(),
            form.focus == TxField::Description,
            "",
        ),
        field("Tutar", form.amount.clone(), form.focus == TxField::Amount, ""),
        field(
            "Yön",
            form.direction.as_str().to_string(),
            form.focus == TxField::Direction,
            "←/→ değiştir",
        ),
        field(
            "Kategori",
            form.category.clone(),
            form.focus == TxField::Category,
            "",
        ),
    ];

    lines.push(Line::from(""));
    if let Some(err) = &form.error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(theme.error),
        )));
    } else if form.submitting {
        lines.push(Line::from(Span::styled(
            "Kaydediliyor…",
            Style::default().fg(theme.text_muted),
        )));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_category_edit(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card_area = centered_box(48, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Kategori düzenle ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Kategori: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{}│", state.transactions.category_input),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(Span::styled(
            "Boş bırakmak kategoriyi kaldırır.",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_upload(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card_area = centered_box(60, 6, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" İşlem dosyası yükle ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Biçim: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                state.transactions.upload_kind.label(),
                Style::default().fg(theme.text),
            ),
            Span::styled("  (Tab ile değiştir)", Style::default().fg(theme.dim)),
        ]),
        Line::from(vec![
            Span::styled("Dosya yolu: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{}│", state.transactions.upload_path),
                Style::default().fg(theme.accent),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let card_area = centered_box(52, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Silme onayı ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "İşlemi silmek istediğinize emin misiniz?",
            Style::default().fg(theme.text),
        ))),
        inner,
    );
}
