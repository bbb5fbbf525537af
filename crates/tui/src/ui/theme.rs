use engine::Rgb;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub panel: Color,
    pub text: Color,
    pub dim: Color,
    pub accent: Color,
    pub border: Color,
    pub border_focused: Color,
    pub positive: Color,
    pub error: Color,
    pub emphasis: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(8, 12, 16),
            panel: Color::Rgb(20, 26, 32),
            text: Color::Rgb(220, 220, 220),
            dim: Color::Rgb(140, 140, 140),
            accent: Color::Rgb(0, 128, 128),
            border: Color::Rgb(60, 70, 80),
            border_focused: Color::Rgb(0, 179, 179),
            positive: Color::Rgb(80, 180, 120),
            error: Color::Rgb(200, 80, 80),
            emphasis: Color::Rgb(255, 165, 0),
        }
    }
}

/// Terminal color for an engine palette entry.
pub fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
