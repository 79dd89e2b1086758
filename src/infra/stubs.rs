//! In-memory store double for exercising the conversation workflows.

use std::sync::Mutex;

use chrono::{TimeZone, Utc};

use crate::{
    domain::{
        message::{Message, Role},
        session::SessionId,
    },
    usecases::contracts::{HistoryStore, TransportError},
};

/// Append-only in-memory history with the same observable behavior as the
/// backend: ids count up from 1, timestamps follow assignment order, list
/// filters by session.
#[derive(Debug, Default)]
pub struct InMemoryHistory {
    messages: Mutex<Vec<Message>>,
    fail_append: Mutex<Option<TransportError>>,
    fail_list: Mutex<Option<TransportError>>,
}

impl InMemoryHistory {
    /// Makes every append fail with the given error until cleared.
    pub fn fail_append_with(&self, error: TransportError) {
        *self.fail_append.lock().expect("fail_append lock") = Some(error);
    }

    /// Makes every list fail with the given error until cleared.
    pub fn fail_list_with(&self, error: TransportError) {
        *self.fail_list.lock().expect("fail_list lock") = Some(error);
    }

    pub fn clear_failures(&self) {
        *self.fail_append.lock().expect("fail_append lock") = None;
        *self.fail_list.lock().expect("fail_list lock") = None;
    }
}

impl HistoryStore for InMemoryHistory {
    fn append(
        &self,
        session_id: &SessionId,
        role: Role,
        content: &str,
    ) -> Result<Message, TransportError> {
        if let Some(error) = self.fail_append.lock().expect("fail_append lock").clone() {
            return Err(error);
        }

        let mut messages = self.messages.lock().expect("messages lock");
        let id = messages.len() as i64 + 1;
        let message = Message {
            id,
            session_id: session_id.clone(),
            role,
            content: content.to_owned(),
            timestamp: Utc
                .timestamp_opt(1_700_000_000 + id, 0)
                .single()
                .expect("fixture timestamp is valid"),
        };
        messages.push(message.clone());

        Ok(message)
    }

    fn list(&self, session_id: &SessionId) -> Result<Vec<Message>, TransportError> {
        if let Some(error) = self.fail_list.lock().expect("fail_list lock").clone() {
            return Err(error);
        }

        let messages = self.messages.lock().expect("messages lock");
        Ok(messages
            .iter()
            .filter(|message| &message.session_id == session_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appended_messages_list_in_append_order() {
        let store = InMemoryHistory::default();
        let session = SessionId::new("s1");

        for content in ["one", "two", "three"] {
            store
                .append(&session, Role::User, content)
                .expect("append must succeed");
        }

        let listed = store.list(&session).expect("list must succeed");
        let contents: Vec<&str> = listed.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two", "three"]);
        assert!(listed.windows(2).all(|pair| {
            pair[0].timestamp < pair[1].timestamp && pair[0].id < pair[1].id
        }));
    }

    #[test]
    fn list_filters_by_session() {
        let store = InMemoryHistory::default();
        store
            .append(&SessionId::new("s1"), Role::User, "mine")
            .expect("append must succeed");
        store
            .append(&SessionId::new("s2"), Role::User, "theirs")
            .expect("append must succeed");

        let listed = store.list(&SessionId::new("s1")).expect("list must succeed");

        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].content, "mine");
    }

    #[test]
    fn injected_append_failure_is_returned_until_cleared() {
        let store = InMemoryHistory::default();
        let session = SessionId::new("s1");
        store.fail_append_with(TransportError::Status { status: 500 });

        let error = store
            .append(&session, Role::User, "hello")
            .expect_err("append must fail");
        assert_eq!(error, TransportError::Status { status: 500 });

        store.clear_failures();
        store
            .append(&session, Role::User, "hello")
            .expect("append must succeed after clearing");
    }
}
