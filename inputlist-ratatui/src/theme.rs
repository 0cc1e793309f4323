use inputlist::Rgba;
use ratatui::style::Color;

/// Color theme for the terminal grid.
#[derive(Debug, Clone)]
pub struct Theme {
    pub primary: Color,
    pub text: Color,
    pub highlight: Color,
    pub error: Color,
    pub border: Color,
    pub muted: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            text: Color::White,
            highlight: Color::Yellow,
            error: Color::Red,
            border: Color::Gray,
            muted: Color::DarkGray,
        }
    }
}

/// Terminal colour for `rgba`; fully transparent colours have none.
pub fn terminal_color(rgba: Rgba) -> Option<Color> {
    if rgba.is_clear() {
        None
    } else {
        Some(Color::Rgb(rgba.r, rgba.g, rgba.b))
    }
}
