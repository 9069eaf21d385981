use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::{
    app::AppState,
    session::{ChatRole, Session},
    ui::theme::Theme,
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState, session: &Session) {
    let theme = Theme::default();

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(3)])
        .split(area);

    render_transcript(frame, layout[0], session, state, &theme);
    render_input(frame, layout[1], state, &theme);
}

fn render_transcript(
    frame: &mut Frame<'_>,
    area: Rect,
    session: &Session,
    state: &AppState,
    theme: &Theme,
) {
    let block = Block::default().borders(Borders::ALL).title("Asistan");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if session.chat.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Nakit akışınız hakkında soru sorun. Örn: \"Bu ay en büyük giderim ne?\"",
                Style::default().fg(theme.dim),
            )),
            inner,
        );
        return;
    }

    let mut lines: Vec<Line> = Vec::new();
    for message in &session.chat {
        let (prefix, color) = match message.role {
            ChatRole::User => ("Siz", theme.accent),
            ChatRole::Assistant => ("Asistan", theme.positive),
        };
        lines.push(Line::from(Span::styled(
            format!("{prefix}:"),
            Style::default().fg(color),
        )));
        // The answer is markdown; rendered as plain wrapped text.
        for text_line in message.content.lines() {
            lines.push(Line::from(Span::styled(
                text_line.to_string(),
                Style::default().fg(theme.text),
            )));
        }
        lines.push(Line::from(""));
    }
    if state.chat.waiting {
        lines.push(Line::from(Span::styled(
            "Yanıt bekleniyor…",
            Style::default().fg(theme.dim),
        )));
    }

    // Keep the tail of the transcript visible.
    let visible = inner.height as usize;
    let skip = lines.len().saturating_sub(visible);
    let tail: Vec<Line> = lines.into_iter().skip(skip).collect();

    frame.render_widget(Paragraph::new(tail).wrap(Wrap { trim: false }), inner);
}

fn render_input(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("> ", Style::default().fg(theme.accent)),
            Span::styled(
                format!("{}│", state.chat.input),
                Style::default().fg(theme.text),
            ),
        ])),
        inner,
    );
}
