//! Style definitions for the UI components.

use ratatui::style::{Color, Modifier, Style};

/// Style for the user's sender label.
pub fn user_sender_style() -> Style {
    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
}

/// Style for the assistant's sender label.
pub fn agent_sender_style() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Style for message text content.
pub fn message_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for message timestamps.
pub fn message_time_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for date separator lines.
pub fn date_separator_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the "typing" indicator while a reply is pending.
pub fn typing_indicator_style() -> Style {
    Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC)
}

/// Style for panel borders.
pub fn panel_border_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for the input prompt symbol.
pub fn input_prompt_style() -> Style {
    Style::default().fg(Color::Green)
}

/// Style for the input text.
pub fn input_text_style() -> Style {
    Style::default().fg(Color::White)
}

/// Style for the input placeholder.
pub fn input_placeholder_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

/// Style for transient error notices in the status line.
pub fn notice_style() -> Style {
    Style::default().fg(Color::Red)
}

/// Style for the key hints in the status line.
pub fn status_hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}
