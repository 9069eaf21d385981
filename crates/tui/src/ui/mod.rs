pub mod components;
pub mod keymap;
pub mod screens;

mod terminal;
mod theme;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::{AppState, PlannedMode, Screen, Section, TxMode},
    session::Session,
};

pub use terminal::{AppTerminal as Terminal, restore_terminal, setup_terminal};
pub use theme::Theme;

pub fn render(frame: &mut Frame<'_>, state: &AppState, session: &Session) {
    let area = frame.area();
    match state.screen {
        Screen::Login => screens::login::render(frame, area, state),
        Screen::Main => render_shell(frame, area, state, session),
    }
}

fn render_shell(frame: &mut Frame<'_>, area: Rect, state: &AppState, session: &Session) {
    let theme = Theme::default();

    // Main layout: info bar, tabs, content, bottom bar
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info bar
            Constraint::Length(2), // Tab bar
            Constraint::Min(0),    // Main content
            Constraint::Length(1), // Bottom bar
        ])
        .split(area);

    render_info_bar(frame, layout[0], state, &theme);
    components::tabs::render_tabs(frame, layout[1], state.section, &theme);

    let content = layout[2];
    match state.section {
        Section::Home => screens::home::render(frame, content, state),
        Section::Planned => screens::planned::render(frame, content, state),
        Section::Transactions => screens::transactions::render(frame, content, state),
        Section::Chat => screens::chat::render(frame, content, state, session),
    }

    render_bottom_bar(frame, layout[3], state, &theme);

    // Overlays, innermost last so it draws on top.
    if state.health_detail.is_some() {
        screens::health_detail::render(frame, area, state);
    }
    if state.match_flow.is_some() {
        screens::match_modal::render(frame, area, state);
    }
    if state.initial_balance.is_some() {
        screens::initial_balance::render(frame, area, state);
    }
    components::toast::render(frame, area, state.toast.as_ref());
}

fn render_info_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let user = if state.display_name.is_empty() {
        "-"
    } else {
        state.display_name.as_str()
    };
    let refresh = state
        .last_refresh
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string());
    let status = if state.loading { "Yükleniyor…" } else { "" };

    let line = Line::from(vec![
        Span::styled("Kullanıcı", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {user}  ")),
        Span::styled("Dönem", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {}  ", state.filter.label())),
        Span::styled("Yenileme", Style::default().fg(theme.text_muted)),
        Span::raw(format!(": {refresh}  ")),
        Span::styled(status, Style::default().fg(theme.warning)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_bottom_bar(frame: &mut Frame<'_>, area: Rect, state: &AppState, theme: &Theme) {
    let mut parts = components::tabs::tab_shortcuts(theme);

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("r", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" yenile  "));
    parts.push(Span::styled("f", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" dönem  "));
    parts.push(Span::styled("x", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" çıkış yap"));

    let context_hints = get_context_hints(state, theme);
    if !context_hints.is_empty() {
        parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
        parts.extend(context_hints);
    }

    parts.push(Span::styled("  │  ", Style::default().fg(theme.border)));
    parts.push(Span::styled("q", Style::default().fg(theme.accent)));
    parts.push(Span::raw(" kapat"));

    let bar = Paragraph::new(Line::from(parts));
    frame.render_widget(bar, area);
}

/// Context-specific keyboard hints for the current section and mode.
fn get_context_hints(state: &AppState, theme: &Theme) -> Vec<Span<'static>> {
    if state.match_flow.is_some() {
        return vec![
            Span::styled("Boşluk", Style::default().fg(theme.accent)),
            Span::raw(" seç  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" onayla  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" kapat"),
        ];
    }
    if state.health_detail.is_some() {
        return vec![
            Span::styled("←/→", Style::default().fg(theme.accent)),
            Span::raw(" kart  "),
            Span::styled("d", Style::default().fg(theme.accent)),
            Span::raw(" eşleşme sil  "),
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" eşle  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" kapat"),
        ];
    }

    match state.section {
        Section::Home => vec![
            Span::styled("m", Style::default().fg(theme.accent)),
            Span::raw(" eşleştirme detayı"),
        ],
        Section::Planned => match state.planned.mode {
            PlannedMode::List => vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" eşle  "),
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" yeni  "),
                Span::styled("u", Style::default().fg(theme.accent)),
                Span::raw(" CSV yükle  "),
                Span::styled("d", Style::default().fg(theme.accent)),
                Span::raw(" sil"),
            ],
            PlannedMode::ConfirmDelete => vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" silmeyi onayla  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" vazgeç"),
            ],
            _ => vec![
                Span::styled("Tab", Style::default().fg(theme.accent)),
                Span::raw(" alan  "),
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" kaydet  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" vazgeç"),
            ],
        },
        Section::Transactions => match state.transactions.mode {
            TxMode::List => vec![
                Span::styled("n", Style::default().fg(theme.accent)),
                Span::raw(" yeni  "),
                Span::styled("e", Style::default().fg(theme.accent)),
                Span::raw(" kategori  "),
                Span::styled("u", Style::default().fg(theme.accent)),
                Span::raw(" dosya yükle  "),
                Span::styled("d", Style::default().fg(theme.accent)),
                Span::raw(" sil"),
            ],
            TxMode::Upload => vec![
                Span::styled("Tab", Style::default().fg(theme.accent)),
                Span::raw(" banka  "),
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" yükle  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" vazgeç"),
            ],
            TxMode::ConfirmDelete => vec![
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" silmeyi onayla  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" vazgeç"),
            ],
            _ => vec![
                Span::styled("Tab", Style::default().fg(theme.accent)),
                Span::raw(" alan  "),
                Span::styled("Enter", Style::default().fg(theme.accent)),
                Span::raw(" kaydet  "),
                Span::styled("Esc", Style::default().fg(theme.accent)),
                Span::raw(" vazgeç"),
            ],
        },
        Section::Chat => vec![
            Span::styled("Enter", Style::default().fg(theme.accent)),
            Span::raw(" gönder  "),
            Span::styled("Esc", Style::default().fg(theme.accent)),
            Span::raw(" özete dön"),
        ],
    }
}

/// Calculates a centered rect, used by modal overlays.
pub(crate) fn centered_box(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
