use super::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Tick,
    QuitRequested,
    InputKey(KeyInput),
    /// Progress of an in-flight turn, delivered from the send worker.
    Turn(TurnEvent),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyInput {
    /// Named key ("enter", "backspace", "left", ...) or a single character.
    pub key: String,
    pub ctrl: bool,
}

impl KeyInput {
    pub fn new(key: impl Into<String>, ctrl: bool) -> Self {
        Self {
            key: key.into(),
            ctrl,
        }
    }
}

/// Outcome of one step of the send pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnEvent {
    /// The user message was persisted and returned by the store.
    UserStored(Message),
    /// The agent reply was persisted and returned by the store.
    AgentStored(Message),
    Failed(TurnFailure),
}

/// Pipeline stage at which a turn failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnStage {
    UserAppend,
    AgentAppend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnFailure {
    pub stage: TurnStage,
    pub detail: String,
}
