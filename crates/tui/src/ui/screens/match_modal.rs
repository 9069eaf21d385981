use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::AppState,
    reconcile::{FlowMessage, FlowPhase, MatchFlow},
    ui::{centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(flow) = &state.match_flow else {
        return;
    };
    let theme = Theme::default();

    let width = area.width.saturating_sub(8).min(86);
    let height = area.height.saturating_sub(4).min(22);
    let card_area = centered_box(width, height, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(format!(" Eşle — Planlı #{} ", flow.planned.id))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Planned header
            Constraint::Min(4),    // Suggestions
            Constraint::Length(1), // Amount input
            Constraint::Length(1), // Confirm state
            Constraint::Length(1), // Message
        ])
        .split(inner);

    render_planned_header(frame, layout[0], flow, &theme);
    render_suggestions(frame, layout[1], flow, &theme);
    render_amount(frame, layout[2], flow, &theme);
    render_confirm(frame, layout[3], flow, &theme);
    render_message(frame, layout[4], flow, &theme);
}

fn render_planned_header(frame: &mut Frame<'_>, area: Rect, flow: &MatchFlow, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Vade", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  •  ", flow.planned.due_date)),
        Span::styled("Yön", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  •  ", flow.planned.direction.as_str())),
        Span::styled("Kalan", Style::default().fg(theme.text_muted)),
        Span::raw(": "),
        Span::styled(
            flow.planned.remaining_amount.to_string(),
            Style::default().fg(theme.warning),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_suggestions(frame: &mut Frame<'_>, area: Rect, flow: &MatchFlow, theme: &Theme) {
    match &flow.phase {
        FlowPhase::LoadingSuggestions => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    "Öneriler yükleniyor...",
                    Style::default().fg(theme.dim),
                )),
                area,
            );
        }
        FlowPhase::SuggestionsError(message) => {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Hata: {message}"),
                    Style::default().fg(theme.error),
                )),
                area,
            );
        }
        FlowPhase::SuggestionsReady | FlowPhase::Submitting => {
            if flow.suggestions.is_empty() {
                frame.render_widget(
                    Paragraph::new(Span::styled(
                        "Öneri bulunamadı. (Tutar/tarih aralığında uygun işlem yok.)",
                        Style::default().fg(theme.dim),
                    )),
                    area,
                );
                return;
            }

            let header = Line::from(Span::styled(
                format!(
                    "{:<4}{:<12}{:<16}{:<34}{:>6}",
                    "Seç", "Tarih", "Tutar", "Açıklama", "Skor"
                ),
                Style::default().fg(theme.text_muted),
            ));
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Length(1), Constraint::Min(1)])
                .split(area);
            frame.render_widget(Paragraph::new(header), rows[0]);

            let items: Vec<ListItem> = flow
                .suggestions
                .iter()
                .enumerate()
                .map(|(index, suggestion)| {
                    let radio = if flow.selected == Some(index) {
                        "(•)"
                    } else {
                        "( )"
                    };
                    let description: String =
                        suggestion.description.chars().take(32).collect();
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{radio} "), Style::default().fg(theme.accent)),
                        Span::styled(
                            format!("{:<12}", suggestion.date.to_string()),
                            Style::default().fg(theme.dim),
                        ),
                        Span::styled(
                            format!("{:<16}", suggestion.amount.to_string()),
                            Style::default().fg(theme.text),
                        ),
                        Span::styled(
                            format!("{description:<34}"),
                            Style::default().fg(theme.text_muted),
                        ),
                        Span::styled(
                            format!("{:>6}", suggestion.score),
                            Style::default().fg(theme.dim),
                        ),
                    ]))
                })
                .collect();

            let mut list_state = ListState::default();
            list_state.select(Some(flow.cursor));

            let list = List::new(items)
                .highlight_style(
                    Style::default()
                        .fg(theme.accent)
                        .add_modifier(Modifier::BOLD),
                )
                .highlight_symbol("» ");

            frame.render_stateful_widget(list, rows[1], &mut list_state);
        }
    }
}

fn render_amount(frame: &mut Frame<'_>, area: Rect, flow: &MatchFlow, theme: &Theme) {
    let line = Line::from(vec![
        Span::styled("Eşleşme Tutarı: ", Style::default().fg(theme.text_muted)),
        Span::styled(
            format!("{}│", flow.amount_input),
            Style::default().fg(theme.accent),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn render_confirm(frame: &mut Frame<'_>, area: Rect, flow: &MatchFlow, theme: &Theme) {
    let (label, style) = if flow.is_submitting() {
        ("Eşleniyor...", Style::default().fg(theme.dim))
    } else if flow.can_confirm() {
        (
            "[ Onayla (Enter) ]",
            Style::default()
                .fg(theme.positive)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        ("[ Onayla ]", Style::default().fg(theme.dim))
    };
    frame.render_widget(Paragraph::new(Span::styled(label, style)), area);
}

fn render_message(frame: &mut Frame<'_>, area: Rect, flow: &MatchFlow, theme: &Theme) {
    let Some(message) = &flow.message else {
        return;
    };
    let (text, color) = match message {
        FlowMessage::Error(text) => (text.as_str(), theme.error),
        FlowMessage::Success(text) => (text.as_str(), theme.positive),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(text, Style::default().fg(color))),
        area,
    );
}
