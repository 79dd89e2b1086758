use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::domain::shell_state::ShellState;

use super::{
    message_input::render_message_input,
    message_rendering::{build_transcript_elements, element_to_lines},
    styles,
};

const TYPING_INDICATOR: &str = "Bakery Assistant is typing...";
const STATUS_HINTS: &str = "Enter send · Esc clear · Ctrl+C quit";

pub fn render(frame: &mut Frame<'_>, state: &ShellState) {
    let [transcript_area, input_area, status_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

    render_transcript(frame, transcript_area, state);
    render_message_input(frame, input_area, state.input());
    render_status(frame, status_area, state);
}

fn render_transcript(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::panel_border_style())
        .title(" Bakery Assistant ");
    let inner = block.inner(area);
    let width = inner.width.max(1) as usize;

    let mut lines: Vec<Line<'static>> =
        build_transcript_elements(state.transcript().messages())
            .iter()
            .flat_map(|element| element_to_lines(element, width))
            .collect();

    if state.transcript().is_awaiting_reply() {
        lines.push(Line::from(Span::styled(
            TYPING_INDICATOR,
            styles::typing_indicator_style(),
        )));
    }

    // Stick to the newest message, like the widget's scroll-to-bottom.
    let overflow = lines.len().saturating_sub(inner.height as usize);
    let paragraph = Paragraph::new(Text::from(lines))
        .block(block)
        .scroll((overflow.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(paragraph, area);
}

fn render_status(frame: &mut Frame<'_>, area: Rect, state: &ShellState) {
    let line = match state.notice() {
        Some(notice) => Line::from(Span::styled(notice.to_owned(), styles::notice_style())),
        None => Line::from(Span::styled(STATUS_HINTS, styles::status_hint_style())),
    };

    frame.render_widget(Paragraph::new(line), area);
}
