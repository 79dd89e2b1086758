//! History backend integration: REST client and wire mapping.

mod client;
mod wire;

pub use client::{ApiClient, ApiClientError};

/// Returns the history module name for smoke checks.
pub fn module_name() -> &'static str {
    "history"
}
