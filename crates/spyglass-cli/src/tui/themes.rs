//! Color themes for the viewer

use once_cell::sync::Lazy;
use ratatui::style::Color;

/// All colors the viewer draws with
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub display_name: String,

    pub bg: Color,
    pub text: Color,
    pub dim: Color,
    pub border: Color,
    pub title: Color,
    pub accent: Color,
    pub heading: Color,
    pub sub_heading: Color,
    pub code: Color,
    pub quote: Color,
    pub selection_bg: Color,
    pub selection_fg: Color,
    pub scrollbar_thumb: Color,
    pub scrollbar_track: Color,
}

fn spyglass() -> Theme {
    Theme {
        name: "spyglass".into(),
        display_name: "Spyglass".into(),
        bg: Color::Rgb(18, 22, 28),
        text: Color::Rgb(205, 214, 222),
        dim: Color::Rgb(110, 122, 134),
        border: Color::Rgb(58, 70, 82),
        title: Color::Rgb(235, 203, 139),
        accent: Color::Rgb(97, 175, 175),
        heading: Color::Rgb(235, 203, 139),
        sub_heading: Color::Rgb(163, 190, 140),
        code: Color::Rgb(180, 142, 173),
        quote: Color::Rgb(110, 122, 134),
        selection_bg: Color::Rgb(45, 55, 68),
        selection_fg: Color::Rgb(220, 228, 236),
        scrollbar_thumb: Color::Rgb(97, 175, 175),
        scrollbar_track: Color::Rgb(40, 48, 58),
    }
}

fn paper() -> Theme {
    Theme {
        name: "paper".into(),
        display_name: "Paper".into(),
        bg: Color::Rgb(246, 243, 236),
        text: Color::Rgb(50, 48, 44),
        dim: Color::Rgb(140, 134, 124),
        border: Color::Rgb(196, 190, 178),
        title: Color::Rgb(148, 82, 0),
        accent: Color::Rgb(0, 110, 120),
        heading: Color::Rgb(148, 82, 0),
        sub_heading: Color::Rgb(86, 110, 40),
        code: Color::Rgb(120, 60, 120),
        quote: Color::Rgb(140, 134, 124),
        selection_bg: Color::Rgb(224, 218, 204),
        selection_fg: Color::Rgb(30, 28, 24),
        scrollbar_thumb: Color::Rgb(0, 110, 120),
        scrollbar_track: Color::Rgb(224, 218, 204),
    }
}

/// Native terminal colors only; for scripts and odd terminals
fn terminal() -> Theme {
    Theme {
        name: "terminal".into(),
        display_name: "Terminal".into(),
        bg: Color::Reset,
        text: Color::Reset,
        dim: Color::DarkGray,
        border: Color::DarkGray,
        title: Color::Yellow,
        accent: Color::Cyan,
        heading: Color::Yellow,
        sub_heading: Color::Green,
        code: Color::Magenta,
        quote: Color::DarkGray,
        selection_bg: Color::DarkGray,
        selection_fg: Color::White,
        scrollbar_thumb: Color::Cyan,
        scrollbar_track: Color::DarkGray,
    }
}

/// Registry of all built-in themes
pub struct ThemeRegistry {
    themes: Vec<Theme>,
}

impl ThemeRegistry {
    fn new() -> Self {
        Self {
            themes: vec![spyglass(), paper(), terminal()],
        }
    }

    /// Get a theme by name, or the default theme
    pub fn get_or_default(&self, name: &str) -> &Theme {
        self.themes
            .iter()
            .find(|theme| theme.name == name)
            .unwrap_or(&self.themes[0])
    }

    /// List all themes in registration order
    pub fn list(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }
}

pub static THEME_REGISTRY: Lazy<ThemeRegistry> = Lazy::new(ThemeRegistry::new);
