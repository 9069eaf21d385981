use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, IbField},
    ui::{centered_box, theme::Theme},
};

/// Onboarding prompt shown when the backend reports no configured initial
/// balance (the cash-position 404 signal).
pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let Some(form) = &state.initial_balance else {
        return;
    };
    let theme = Theme::default();

    let card_area = centered_box(56, 9, area);
    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Başlangıç bakiyesi ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let field = |label: &str, value: &str, focused: bool| -> Line<'static> {
        let style = if focused {
            Style::default().fg(theme.accent)
        } else {
            Style::default().fg(theme.text)
        };
        let cursor = if focused { "│" } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{label:<10}"),
                Style::default().fg(theme.text_muted),
            ),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let mut lines = vec![
        Line::from(Span::styled(
            "Nakit pozisyonu için başlangıç bakiyenizi girin.",
            Style::default().fg(theme.text_muted),
        )),
        Line::from(""),
        field("Bakiye", &form.amount, form.focus == IbField::Amount),
        field("Tarih", &form.date, form.focus == IbField::Date),
        Line::from(""),
    ];

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
