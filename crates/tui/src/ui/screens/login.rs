use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::Span,
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use crate::{
    app::{AppState, LoginField},
    ui::{centered_box, theme::Theme},
};

pub fn render(frame: &mut Frame<'_>, area: Rect, state: &AppState) {
    let theme = Theme::default();

    let box_width = 40;
    let box_height = 7;
    let card_area = centered_box(box_width, box_height, area);

    frame.render_widget(Clear, card_area);

    let block = Block::default()
        .title(" Seyfo — giriş ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));

    let inner = block.inner(card_area);
    frame.render_widget(block, card_area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // E-mail
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status
        ])
        .margin(1)
        .split(inner);

    let login = &state.login;

    render_input(
        frame,
        rows[0],
        &login.username,
        false,
        login.focus == LoginField::Username,
        &theme,
    );
    render_input(
        frame,
        rows[2],
        &login.password,
        true,
        login.focus == LoginField::Password,
        &theme,
    );

    if login.submitting {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Giriş yapılıyor…",
                Style::default().fg(theme.text_muted),
            ))
            .alignment(Alignment::Center),
            rows[4],
        );
    }

    if let Some(message) = &login.message {
        let error_area = Rect {
            x: card_area.x,
            y: card_area.y + card_area.height + 1,
            width: card_area.width,
            height: 1,
        };
        frame.render_widget(
            Paragraph::new(Span::styled(
                message.as_str(),
                Style::default().fg(theme.error),
            ))
            .alignment(Alignment::Center),
            error_area,
        );
    }
}

fn render_input(
    frame: &mut Frame<'_>,
    area: Rect,
    value: &str,
    is_password: bool,
    focused: bool,
    theme: &Theme,
) {
    let cursor = if focused { "│" } else { "" };

    let display = if is_password {
        format!("{}{}", mask_password(value), cursor)
    } else {
        format!("{value}{cursor}")
    };

    let style = if focused {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    frame.render_widget(Paragraph::new(Span::styled(display, style)), area);
}

/// Masks password with bullets, one per character.
fn mask_password(password: &str) -> String {
    if password.is_empty() {
        String::new()
    } else {
        "•".repeat(password.chars().count())
    }
}
