//! Styling utilities and color schemes

use ratatui::style::{Color, Modifier, Style};

pub fn focused_border() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn unfocused_border() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn border_for(focused: bool) -> Style {
    if focused {
        focused_border()
    } else {
        unfocused_border()
    }
}

pub fn error_text() -> Style {
    Style::default().fg(Color::Red)
}

pub fn label_text() -> Style {
    Style::default().fg(Color::Cyan)
}

pub fn cursor_cell() -> Style {
    Style::default().add_modifier(Modifier::REVERSED)
}

/// Submit control: bold when it can be pressed, dimmed otherwise
pub fn submit_button(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray).bg(Color::DarkGray)
    }
}
