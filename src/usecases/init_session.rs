//! Use case for bringing up the transcript of a session.
//!
//! A fresh session gets exactly one persisted welcome message; an existing
//! transcript is restored as-is. When the store cannot be reached the shell
//! still opens with a local, unpersisted welcome so the interface is never
//! blank.

use chrono::Utc;

use crate::domain::{
    message::{Message, Role},
    reply,
    session::SessionId,
};

use super::contracts::{HistoryStore, TransportError};

/// How the initial transcript was obtained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitMode {
    /// An existing non-empty transcript was fetched from the store.
    Restored,
    /// The transcript was empty; the welcome message was persisted.
    Welcomed,
    /// The store failed; the transcript holds a local, unpersisted welcome.
    Offline(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInit {
    pub transcript: Vec<Message>,
    pub mode: InitMode,
}

/// Initializes the transcript for a session.
///
/// Lists the persisted transcript; if it is empty, persists the welcome
/// message and seeds the transcript with the stored record, so the welcome
/// is stored exactly once per session. Initializing again on a now
/// non-empty transcript restores it without appending a second welcome.
pub fn init_session(store: &dyn HistoryStore, session_id: &SessionId) -> SessionInit {
    match store.list(session_id) {
        Ok(messages) if !messages.is_empty() => SessionInit {
            transcript: messages,
            mode: InitMode::Restored,
        },
        Ok(_) => match store.append(session_id, Role::Agent, reply::WELCOME_MESSAGE) {
            Ok(message) => SessionInit {
                transcript: vec![message],
                mode: InitMode::Welcomed,
            },
            Err(error) => offline_fallback(session_id, error),
        },
        Err(error) => offline_fallback(session_id, error),
    }
}

/// Local welcome shown when the store is unavailable; never retried onto
/// the store.
fn offline_fallback(session_id: &SessionId, error: TransportError) -> SessionInit {
    let welcome = Message {
        id: 0,
        session_id: session_id.clone(),
        role: Role::Agent,
        content: reply::WELCOME_MESSAGE.to_owned(),
        timestamp: Utc::now(),
    };

    SessionInit {
        transcript: vec![welcome],
        mode: InitMode::Offline(error),
    }
}
