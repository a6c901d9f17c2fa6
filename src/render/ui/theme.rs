//! Color themes for the table surface using ratatui styles directly.

use crate::config::ThemeName;
use ratatui::style::{Color, Modifier, Style};

/// Styles for every element the terminal UI draws.
#[derive(Debug, Clone)]
pub struct ColorTheme {
    /// Table header row
    pub header: Style,

    /// Selected body row
    pub selection: Style,

    /// Toolbar chip that is switched on
    pub toggle_on: Style,

    /// Toolbar chip that is switched off
    pub toggle_off: Style,

    /// Toolbar chip for a field currently being edited
    pub editing: Style,

    /// DD slot holding a `-` or `x` sentinel
    pub dd_sentinel: Style,

    /// DD slot holding a numeric difficulty
    pub dd_value: Style,

    pub status_bg: Color,
    pub status_fg: Color,

    /// Borders of the picker and help overlays
    pub popup_border: Style,
}

impl Default for ColorTheme {
    fn default() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::White).bg(Color::Blue),
            toggle_on: Style::default().fg(Color::Black).bg(Color::Green),
            toggle_off: Style::default().fg(Color::Gray),
            editing: Style::default().fg(Color::Black).bg(Color::Yellow),
            dd_sentinel: Style::default().fg(Color::DarkGray),
            dd_value: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Blue,
            status_fg: Color::White,
            popup_border: Style::default().fg(Color::Cyan),
        }
    }
}

impl ColorTheme {
    /// Theme for terminals without color support.
    pub fn monochrome() -> Self {
        Self {
            header: Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            selection: Style::default().add_modifier(Modifier::REVERSED),
            toggle_on: Style::default().add_modifier(Modifier::REVERSED),
            toggle_off: Style::default(),
            editing: Style::default().add_modifier(Modifier::UNDERLINED),
            dd_sentinel: Style::default().add_modifier(Modifier::DIM),
            dd_value: Style::default().add_modifier(Modifier::BOLD),
            status_bg: Color::Black,
            status_fg: Color::White,
            popup_border: Style::default(),
        }
    }

    /// High-contrast theme for accessibility.
    pub fn high_contrast() -> Self {
        Self {
            header: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            selection: Style::default().fg(Color::Black).bg(Color::LightYellow),
            toggle_on: Style::default().fg(Color::Black).bg(Color::LightGreen),
            toggle_off: Style::default().fg(Color::White),
            editing: Style::default().fg(Color::Black).bg(Color::LightCyan),
            dd_sentinel: Style::default().fg(Color::Gray),
            dd_value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            status_bg: Color::White,
            status_fg: Color::Black,
            popup_border: Style::default().fg(Color::LightYellow),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Default => Self::default(),
            ThemeName::Monochrome => Self::monochrome(),
            ThemeName::HighContrast => Self::high_contrast(),
        }
    }

    pub fn status(&self) -> Style {
        Style::default().bg(self.status_bg).fg(self.status_fg)
    }

    /// Style for a difficulty cell: dimmed sentinel or bold number.
    pub fn dd_cell(&self, parsed: Option<f64>) -> Style {
        match parsed {
            Some(_) => self.dd_value,
            None => self.dd_sentinel,
        }
    }

    pub fn chip(&self, on: bool) -> Style {
        if on {
            self.toggle_on
        } else {
            self.toggle_off
        }
    }
}
