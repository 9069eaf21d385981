use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::{
    app::{AppState, HealthDetailState, HealthRows},
    health::HealthKind,
    ui::{centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(detail) = &state.health_detail else {
        return;
    };
    let theme = Theme::default();

    let width = area.width.saturating_sub(10).min(90);
    let height = area.height.saturating_sub(6).min(20);
    let card_area = centered_box(width, height, area);
    frame.render_widget(Clear, card_area);

    let count = state
        .data
        .matching_health
        .as_ref()
        .map(|health| detail.kind.counter(health))
        .unwrap_or_else(|| detail.rows.len() as i64);

    let block = Block::default()
        .title(format!(" {} ({count}) ", detail.kind.label()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Bucket selector
            Constraint::Min(2),    // Rows
            Constraint::Length(1), // Message
        ])
        .split(inner);

    render_bucket_bar(frame, layout[0], detail, &theme);
    render_rows(frame, layout[1], detail, &theme);

    if let Some(message) = &detail.message {
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            )),
            layout[2],
        );
    }
}

fn render_bucket_bar(frame: &mut Frame<'_>, area: Rect, detail: &HealthDetailState, theme: &Theme) {
    let mut spans = Vec::new();
    for (i, kind) in HealthKind::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        if *kind == detail.kind {
            spans.push(Span::styled(
                kind.label(),
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                kind.label(),
                Style::default().fg(theme.text_muted),
            ));
        }
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_rows(frame: &mut Frame<'_>, area: Rect, detail: &HealthDetailState, theme: &Theme) {
    if detail.loading {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Yükleniyor...",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }
    if detail.rows.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Kayıt bulunamadı",
                Style::default().fg(theme.dim),
            )),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = match &detail.rows {
        HealthRows::Matches(rows) => rows
            .iter()
            .map(|row| {
                let reference = row
                    .planned_reference
                    .clone()
                    .filter(|r| !r.is_empty())
                    .unwrap_or_else(|| "—".to_string());
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("planlı {:<10}", row.planned_item_id),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(format!("{reference:<14}"), Style::default().fg(theme.dim)),
                    Span::styled(
                        format!("işlem {:<10}", row.transaction_id),
                        Style::default().fg(theme.text_muted),
                    ),
                    Span::styled(
                        format!("{:<14}", row.matched_amount.to_string()),
                        Style::default().fg(theme.text),
                    ),
                    Span::styled(row.match_type.clone(), Style::default().fg(theme.dim)),
                ]))
            })
            .collect(),
        HealthRows::Planned(rows) => rows
            .iter()
            .map(|item| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("{}  ", item.due_date),
                        Style::default().fg(theme.dim),
                    ),
                    Span::styled(
                        format!("{:<14}", item.amount.to_string()),
                        Style::default().fg(theme.text),
                    ),
                    Span::styled(
                        format!("kalan {:<14}", item.remaining_amount.to_string()),
                        Style::default().fg(theme.warning),
                    ),
                    Span::styled(
                        item.counterparty.clone().unwrap_or_else(|| "—".to_string()),
                        Style::default().fg(theme.text_muted),
                    ),
                ]))
            })
            .collect(),
    };

    let mut list_state = ListState::default();
    list_state.select(Some(detail.selected));

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("» ");

    frame.render_stateful_widget(list, area, &mut list_state);
}
