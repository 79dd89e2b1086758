use std::{sync::mpsc, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};

use crate::{
    domain::events::{AppEvent, KeyInput},
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// Merges turn events from the send worker with terminal key input.
///
/// Worker events are drained first so store confirmations land in the
/// transcript ahead of further typing.
pub struct TerminalEventSource {
    turn_events: mpsc::Receiver<AppEvent>,
}

impl TerminalEventSource {
    pub fn new(turn_events: mpsc::Receiver<AppEvent>) -> Self {
        Self { turn_events }
    }
}

impl AppEventSource for TerminalEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        // Disconnected means no worker is running; key input still flows.
        if let Ok(event) = self.turn_events.try_recv() {
            return Ok(Some(event));
        }

        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                return Ok(None);
            }

            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            if key.code == KeyCode::Char('c') && ctrl {
                return Ok(Some(AppEvent::QuitRequested));
            }

            let named = match key.code {
                KeyCode::Enter => Some("enter"),
                KeyCode::Backspace => Some("backspace"),
                KeyCode::Delete => Some("delete"),
                KeyCode::Left => Some("left"),
                KeyCode::Right => Some("right"),
                KeyCode::Home => Some("home"),
                KeyCode::End => Some("end"),
                KeyCode::Esc => Some("esc"),
                _ => None,
            };

            if let Some(name) = named {
                return Ok(Some(AppEvent::InputKey(KeyInput::new(name, ctrl))));
            }

            if let KeyCode::Char(ch) = key.code {
                return Ok(Some(AppEvent::InputKey(KeyInput::new(
                    ch.to_string(),
                    ctrl,
                ))));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
