//! Use case for sending one user turn through the history store.
//!
//! A turn is two appends in strict sequence: the user message, then the
//! generated agent reply. Nothing enters the caller's transcript except
//! records the store has confirmed, so a failure at either step never needs
//! a rollback.

use crate::domain::{
    events::{TurnEvent, TurnFailure, TurnStage},
    message::{Message, Role},
    reply,
    session::SessionId,
};

use super::contracts::{HistoryStore, TransportError};

/// Domain-level errors for the user half of a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendTurnError {
    /// Message text is empty after trimming whitespace.
    EmptyMessage,
    /// The store rejected or never received the append.
    Transport(TransportError),
}

/// Validates and persists the user's side of a turn.
///
/// Rejects text that is empty after trimming. On transport failure nothing
/// was stored and the caller's transcript must stay exactly as it was.
pub fn store_user_turn(
    store: &dyn HistoryStore,
    session_id: &SessionId,
    text: &str,
) -> Result<Message, SendTurnError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(SendTurnError::EmptyMessage);
    }

    store
        .append(session_id, Role::User, text)
        .map_err(SendTurnError::Transport)
}

/// Generates and persists the agent reply to an already-stored user turn.
///
/// On failure the user message stays persisted; the reply is not retried.
pub fn store_agent_reply(
    store: &dyn HistoryStore,
    session_id: &SessionId,
    user_text: &str,
) -> Result<Message, TransportError> {
    let reply = reply::generate_reply(user_text);
    store.append(session_id, Role::Agent, reply)
}

/// Runs the full send pipeline for one turn, emitting an event after each
/// completed step.
pub fn run_turn(
    store: &dyn HistoryStore,
    session_id: &SessionId,
    text: &str,
    mut emit: impl FnMut(TurnEvent),
) {
    let user_message = match store_user_turn(store, session_id, text) {
        Ok(message) => message,
        Err(error) => {
            emit(TurnEvent::Failed(TurnFailure {
                stage: TurnStage::UserAppend,
                detail: describe_send_error(&error),
            }));
            return;
        }
    };

    let user_text = user_message.content.clone();
    emit(TurnEvent::UserStored(user_message));

    match store_agent_reply(store, session_id, &user_text) {
        Ok(message) => emit(TurnEvent::AgentStored(message)),
        Err(error) => emit(TurnEvent::Failed(TurnFailure {
            stage: TurnStage::AgentAppend,
            detail: error.to_string(),
        })),
    }
}

fn describe_send_error(error: &SendTurnError) -> String {
    match error {
        SendTurnError::EmptyMessage => "message is empty".to_owned(),
        SendTurnError::Transport(transport) => transport.to_string(),
    }
}
