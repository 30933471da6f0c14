use crate::config::Config;
use ratatui::style::Color;

#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub menu_bg: Color,
    pub menu_fg: Color,
    pub menu_border: Color,
    pub find_label: Color,
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            background: Color::Reset,
            foreground: Color::White,
            selection_bg: Color::Blue,
            selection_fg: Color::White,
            menu_bg: Color::DarkGray,
            menu_fg: Color::White,
            menu_border: Color::Cyan,
            find_label: Color::Yellow,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::Black,
            foreground: Color::White,
            selection_bg: Color::DarkGray,
            selection_fg: Color::Cyan,
            menu_bg: Color::Black,
            menu_fg: Color::White,
            menu_border: Color::Gray,
            find_label: Color::Yellow,
            status_bar_bg: Color::DarkGray,
            status_bar_fg: Color::White,
        }
    }

    pub fn light() -> Self {
        Self {
            background: Color::White,
            foreground: Color::Black,
            selection_bg: Color::LightBlue,
            selection_fg: Color::Black,
            menu_bg: Color::Gray,
            menu_fg: Color::Black,
            menu_border: Color::Blue,
            find_label: Color::Blue,
            status_bar_bg: Color::LightBlue,
            status_bar_fg: Color::Black,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        match config.theme.as_str() {
            "dark" => Self::dark(),
            "light" => Self::light(),
            _ => Self::default_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
