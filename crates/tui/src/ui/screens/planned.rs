use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use api_types::planned::{PlannedItem, PlannedStatus};

use crate::{
    app::{AppState, PlannedField, PlannedForm, PlannedMode},
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

    match state.planned.mode {
        PlannedMode::Create => render_form(frame, area, &state.planned.form, &theme),
        PlannedMode::Upload => render_upload(frame, area, state, &theme),
        PlannedMode::ConfirmDelete => render_confirm(frame, area, &theme),
        PlannedMode::List => {}
    }
}

fn render_header(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let open = state
        .planned
        .items
        .iter()
        .filter(|item| item.status.is_open_for_matching())
        .count();

    let mut line = vec![
        Span::styled("Kayıt", Style::default().fg(theme.dim)),
        Span::raw(format!(": {}   ", state.planned.items.len())),
        Span::styled("Açık", Style::default().fg(theme.dim)),
        Span::raw(format!(": {open}")),
    ];

    if let Some(err) = &state.planned.error {
        line.push(Span::raw("   "));
        line.push(Span::styled(err.as_str(), Style::default().fg(theme.error)));
    }

    let block = Block::default().borders(Borders::ALL).title("Planlı Akış");
    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}

fn render_list(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let items = state
        .planned
        .items
        .iter()
        .map(|item| ListItem::new(Line::from(row_spans(item, theme))))
        .collect::<Vec<_>>();

    if items.is_empty() {
        let block = Block::default().borders(Borders::ALL);
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Planlı kalem yok. `n` ile ekleyin, `u` ile CSV yükleyin.",
                Style::default().fg(theme.dim),
            ))
            .block(block),
            area,
        );
        return;
    }

    let mut list_state = ListState::default();
    list_state.select(Some(state.planned.selected));

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

fn row_spans(item: &PlannedItem, theme: &Theme) -> Vec<Span<'static>> {
    let direction = match item.direction {
        api_types::Direction::In => Span::styled("▲ giren", Style::default().fg(theme.positive)),
        api_types::Direction::Out => Span::styled("▼ çıkan", Style::default().fg(theme.negative)),
    };
    let status_color = match item.status {
        PlannedStatus::Open => theme.text_muted,
        PlannedStatus::Partial => theme.warning,
        PlannedStatus::Settled => theme.positive,
    };
    let counterparty = item.counterparty.clone().unwrap_or_else(|| "—".to_string());

    vec![
        Span::styled(
            format!("{}  ", item.due_date),
            Style::default().fg(theme.dim),
        ),
        Span::styled(format!("{:<8}", item.kind.as_str()), Style::default().fg(theme.text)),
        direction,
        Span::raw("  "),
        Span::styled(
            format!("{:<14}", item.amount.to_string()),
            Style::default().fg(theme.text),
        ),
        Span::styled(
            format!("kalan {:<14}", item.remaining_amount.to_string()),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!("{:<8}", item.status.as_str()),
            Style::default().fg(status_color),
        ),
        Span::styled(counterparty, Style::default().fg(theme.text_muted)),
    ]
}

fn render_form(frame: &mut Frame<'_>, area: Rect, form: &PlannedForm, theme: &Theme) {
    let card_area = centered_box(52, 12, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Yeni planlı kalem ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let field =
        |label: &str, value: String, focused: bool, hint: &str| -> Line<'static> {
            let style = if focused {
                Style::default().fg(theme.accent)
            } else {
                Style::default().fg(theme.text)
            };
            let mut spans = vec![
                Span::styled(
                    format!("{label:<14}"),
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
            "Tür",
            form.kind.as_str().to_string(),
            form.focus == PlannedField::Kind,
            "←/→ değiştir",
        ),
        field(
            "Yön",
            form.direction.as_str().to_string(),
            form.focus == PlannedField::Direction,
            "←/→ değiştir",
        ),
        field(
            "Tutar",
            form.amount.clone(),
            form.focus == PlannedField::Amount,
            "",
        ),
        field(
            "Vade",
            form.due_date.clone(),
            form.focus == PlannedField::DueDate,
            "YYYY-AA-GG",
        ),
        field(
            "Karşı taraf",
            form.counterparty.clone(),
            form.focus == PlannedField::Counterparty,
            "",
        ),
        field(
            "Referans",
            form.reference_no.clone(),
            form.focus == PlannedField::Reference,
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

fn render_upload(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let card_area = centered_box(60, 6, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Planlı kalem CSV yükle ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let lines = vec![
        Line::from(vec![
            Span::styled("Dosya yolu: ", Style::default().fg(theme.text_muted)),
            Span::styled(
                format!("{}│", state.planned.upload_path),
                Style::default().fg(theme.accent),
            ),
        ]),
        Line::from(Span::styled(
            "Gerekli kolonlar: type, direction, amount, due_date, counterparty",
            Style::default().fg(theme.dim),
        )),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, theme: &Theme) {
    let card_area = centered_box(56, 5, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Silme onayı ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.error));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Planlanmış kalemi silmek istediğinize emin misiniz?",
            Style::default().fg(theme.text),
        ))),
        inner,
    );
}
