//! Domain layer: core entities and business rules.

pub mod events;
pub mod message;
pub mod message_input_state;
pub mod order;
pub mod reply;
pub mod session;
pub mod shell_state;
pub mod transcript_state;

/// Returns the domain module name for smoke checks.
pub fn module_name() -> &'static str {
    "domain"
}
