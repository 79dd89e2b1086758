//! Transcript rendering logic.
//!
//! Handles visual formatting of the transcript:
//! - Date separators between messages from different days
//! - Sender grouping (consecutive messages from the same side show the
//!   sender label only once)
//! - Newline-separated content segments, wrapped to the panel width

use chrono::{DateTime, Local, NaiveDate, Utc};
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::domain::message::{Message, Role};

use super::styles;

/// Represents a visual element in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptElement {
    /// Date separator line (e.g. "——— 06 Aug 2026 ———").
    DateSeparator(String),
    /// Timestamp line opening a message, with the sender label shown only
    /// when the side changed.
    Header {
        time: String,
        sender: Option<&'static str>,
        role: Role,
    },
    /// One newline-separated segment of a message body.
    Segment { text: String, role: Role },
}

/// Builds the ordered list of visual elements for a transcript.
pub fn build_transcript_elements(messages: &[Message]) -> Vec<TranscriptElement> {
    let mut elements = Vec::new();
    let mut prev_date: Option<NaiveDate> = None;
    let mut prev_role: Option<Role> = None;

    for message in messages {
        let date = local_date(message.timestamp);

        if prev_date != Some(date) {
            elements.push(TranscriptElement::DateSeparator(format_date(date)));
            // Sender grouping restarts under a new date.
            prev_role = None;
        }

        let sender = if prev_role == Some(message.role) {
            None
        } else {
            Some(message.role.display_name())
        };

        elements.push(TranscriptElement::Header {
            time: format_time(message.timestamp),
            sender,
            role: message.role,
        });

        for segment in message.content_segments() {
            elements.push(TranscriptElement::Segment {
                text: segment.to_owned(),
                role: message.role,
            });
        }

        prev_date = Some(date);
        prev_role = Some(message.role);
    }

    elements
}

/// Converts one element into styled lines wrapped to the given width.
pub fn element_to_lines(element: &TranscriptElement, width: usize) -> Vec<Line<'static>> {
    match element {
        TranscriptElement::DateSeparator(date) => {
            vec![Line::from(Span::styled(
                format!("——— {date} ———"),
                styles::date_separator_style(),
            ))]
        }
        TranscriptElement::Header { time, sender, role } => {
            let mut spans = vec![Span::styled(time.clone(), styles::message_time_style())];
            if let Some(sender) = sender {
                let sender_style = match role {
                    Role::User => styles::user_sender_style(),
                    Role::Agent => styles::agent_sender_style(),
                };
                spans.push(Span::raw(" "));
                spans.push(Span::styled((*sender).to_owned(), sender_style));
            }
            vec![Line::from(spans)]
        }
        TranscriptElement::Segment { text, .. } => wrap_to_width(text, width)
            .into_iter()
            .map(|line| Line::from(Span::styled(line, styles::message_text_style())))
            .collect(),
    }
}

/// Greedy word wrap by display width; words wider than the panel are split.
pub fn wrap_to_width(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);

    if text.is_empty() {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in text.split(' ') {
        for piece in split_oversized_word(word, width) {
            let piece_width = piece.width();
            let separator = if current.is_empty() { 0 } else { 1 };

            if current_width + separator + piece_width > width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            }

            if !current.is_empty() {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(&piece);
            current_width += piece_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}

fn split_oversized_word(word: &str, width: usize) -> Vec<String> {
    if word.width() <= width {
        return vec![word.to_owned()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0;

    for ch in word.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if piece_width + ch_width > width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0;
        }
        piece.push(ch);
        piece_width += ch_width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }

    pieces
}

fn local_date(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.with_timezone(&Local).date_naive()
}

fn format_date(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

fn format_time(timestamp: DateTime<Utc>) -> String {
    timestamp.with_timezone(&Local).format("%H:%M").to_string()
}
