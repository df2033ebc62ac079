//! Color tokens shared across the dashboard screens.

use ratatui::style::{Color, Modifier, Style};

pub const ACCENT: Color = Color::Cyan;
pub const HIGHLIGHT: Color = Color::Yellow;
pub const DANGER: Color = Color::Red;
pub const OK: Color = Color::Green;
pub const MUTED: Color = Color::Gray;
pub const FOLDER: Color = Color::Blue;

pub fn title() -> Style {
    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
}

pub fn selected() -> Style {
    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD)
}

pub fn active_border() -> Style {
    Style::default().fg(HIGHLIGHT)
}

pub fn inactive_border() -> Style {
    Style::default().fg(MUTED)
}

pub fn folder() -> Style {
    Style::default().fg(FOLDER)
}

pub fn help() -> Style {
    Style::default().fg(MUTED)
}

pub fn danger() -> Style {
    Style::default().fg(DANGER).add_modifier(Modifier::BOLD)
}

pub fn ok() -> Style {
    Style::default().fg(OK).add_modifier(Modifier::BOLD)
}
