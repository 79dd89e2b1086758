use chrono::{DateTime, Utc};

use super::session::SessionId;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl Role {
    /// Wire spelling of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Agent => "agent",
        }
    }

    /// Parses the wire spelling. Returns None for unknown values.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(Role::User),
            "agent" => Some(Role::Agent),
            _ => None,
        }
    }

    /// Returns the sender label shown in the transcript.
    pub fn display_name(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Agent => "Bakery Assistant",
        }
    }
}

/// One message in a session transcript.
///
/// Append-only: created exactly once, never mutated or deleted. The id and
/// timestamp are assigned by the backing store at persistence time; the
/// transcript is ordered by timestamp with ties broken by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: i64,
    pub session_id: SessionId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Splits the content into its newline-separated segments.
    pub fn content_segments(&self) -> impl Iterator<Item = &str> {
        self.content.split('\n')
    }
}
