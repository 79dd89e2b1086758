use anyhow::Result;
use thiserror::Error;

use crate::domain::{
    events::AppEvent,
    message::{Message, Role},
    order::Order,
    session::SessionId,
    shell_state::ShellState,
};

/// Failure talking to the history backend.
///
/// The only error kind crossing the store seam: adapters map their library
/// errors into it, stubs construct it directly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("history service unreachable: {reason}")]
    Unreachable { reason: String },
    #[error("history service returned status {status}")]
    Status { status: u16 },
    #[error("history service returned a malformed payload: {reason}")]
    InvalidPayload { reason: String },
}

/// Append-only message store for session transcripts.
pub trait HistoryStore {
    /// Persists one message and returns the stored record with its assigned
    /// id and timestamp.
    fn append(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
    ) -> Result<Message, TransportError>;

    /// Fetches the full transcript for a session in persisted order,
    /// oldest first.
    fn list(&self, session_id: &SessionId) -> Result<Vec<Message>, TransportError>;
}

/// Read-only source of orders extracted by the backend.
pub trait OrdersSource {
    fn list_orders(&self) -> Result<Vec<Order>, TransportError>;
}

/// Runs the send pipeline for one turn off the shell loop, delivering
/// progress back as turn events.
pub trait TurnDispatcher {
    fn dispatch(&self, session_id: &SessionId, text: String);
}

pub trait AppEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>>;
}

pub trait ShellOrchestrator {
    fn state(&self) -> &ShellState;
    fn handle_event(&mut self, event: AppEvent) -> Result<()>;
}
