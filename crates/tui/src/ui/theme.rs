use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface_bright: Color,
    pub text: Color,
    pub text_muted: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub negative: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(10, 12, 18),
            surface_bright: Color::Rgb(20, 24, 32),
            text: Color::Rgb(220, 220, 220),
            text_muted: Color::Rgb(160, 165, 175),
            dim: Color::Rgb(120, 125, 135),
            accent: Color::Rgb(220, 60, 70),
            border: Color::Rgb(60, 66, 78),
            border_focused: Color::Rgb(220, 60, 70),
            positive: Color::Rgb(70, 180, 120),
            negative: Color::Rgb(210, 80, 80),
            warning: Color::Rgb(220, 170, 70),
            error: Color::Rgb(210, 80, 80),
        }
    }
}
