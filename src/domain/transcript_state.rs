use super::message::Message;

/// Progress of the send pipeline for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TranscriptPhase {
    #[default]
    Idle,
    /// A turn is in flight: the user message is being persisted or the reply
    /// is being generated and stored. New sends are rejected while set.
    AwaitingReply,
}

/// Locally cached transcript for one session.
///
/// Messages enter the cache only from store-confirmed records (plus the
/// offline welcome fallback), in persisted order, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptState {
    messages: Vec<Message>,
    phase: TranscriptPhase,
}

impl TranscriptState {
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            phase: TranscriptPhase::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.phase == TranscriptPhase::AwaitingReply
    }

    pub fn begin_turn(&mut self) {
        self.phase = TranscriptPhase::AwaitingReply;
    }

    pub fn finish_turn(&mut self) {
        self.phase = TranscriptPhase::Idle;
    }

    pub fn push_message(&mut self, message: Message) {
        self.messages.push(message);
    }
}
