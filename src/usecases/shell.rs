use std::{
    sync::{mpsc, Arc},
    thread,
};

use anyhow::Result;

use crate::domain::{
    events::{AppEvent, KeyInput, TurnEvent, TurnStage},
    session::SessionId,
    shell_state::ShellState,
};

use super::{
    contracts::{HistoryStore, ShellOrchestrator, TurnDispatcher},
    send_turn,
};

/// Shown when a send is rejected because a turn is already in flight.
const TURN_IN_FLIGHT_NOTICE: &str = "Still sending your last message, hold on...";

/// Runs each turn on its own thread and feeds progress back into the shell
/// event loop over the channel.
pub struct ThreadTurnDispatcher {
    store: Arc<dyn HistoryStore + Send + Sync>,
    events: mpsc::Sender<AppEvent>,
}

impl ThreadTurnDispatcher {
    pub fn new(
        store: Arc<dyn HistoryStore + Send + Sync>,
        events: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self { store, events }
    }
}

impl TurnDispatcher for ThreadTurnDispatcher {
    fn dispatch(&self, session_id: &SessionId, text: String) {
        let store = Arc::clone(&self.store);
        let session_id = session_id.clone();
        let events = self.events.clone();

        thread::spawn(move || {
            send_turn::run_turn(store.as_ref(), &session_id, &text, |event| {
                // The shell may already be gone; the turn result is dropped.
                let _ = events.send(AppEvent::Turn(event));
            });
        });
    }
}

pub struct DefaultShellOrchestrator<D>
where
    D: TurnDispatcher,
{
    state: ShellState,
    dispatcher: D,
    session_id: SessionId,
}

impl<D> DefaultShellOrchestrator<D>
where
    D: TurnDispatcher,
{
    pub fn new(state: ShellState, dispatcher: D, session_id: SessionId) -> Self {
        Self {
            state,
            dispatcher,
            session_id,
        }
    }

    fn handle_key(&mut self, key: KeyInput) {
        if key.ctrl {
            return;
        }

        match key.key.as_str() {
            "enter" => self.submit(),
            "backspace" => self.state.input_mut().delete_char_before(),
            "delete" => self.state.input_mut().delete_char_at(),
            "left" => self.state.input_mut().move_cursor_left(),
            "right" => self.state.input_mut().move_cursor_right(),
            "home" => self.state.input_mut().move_cursor_home(),
            "end" => self.state.input_mut().move_cursor_end(),
            "esc" => self.state.input_mut().clear(),
            key => {
                let mut chars = key.chars();
                if let (Some(ch), None) = (chars.next(), chars.next()) {
                    self.state.input_mut().insert_char(ch);
                }
            }
        }
    }

    /// Starts a turn for the composed text.
    ///
    /// Empty input is a no-op; a send while a turn is in flight is rejected
    /// rather than queued, so at most one turn is outstanding at a time.
    fn submit(&mut self) {
        if self.state.input().text().trim().is_empty() {
            return;
        }

        if self.state.transcript().is_awaiting_reply() {
            self.state.set_notice(TURN_IN_FLIGHT_NOTICE);
            return;
        }

        self.state.clear_notice();
        let text = self.state.input_mut().take();
        self.state.transcript_mut().begin_turn();
        self.dispatcher.dispatch(&self.session_id, text);
    }

    fn apply_turn_event(&mut self, event: TurnEvent) {
        match event {
            TurnEvent::UserStored(message) => {
                self.state.transcript_mut().push_message(message);
            }
            TurnEvent::AgentStored(message) => {
                self.state.transcript_mut().push_message(message);
                self.state.transcript_mut().finish_turn();
            }
            TurnEvent::Failed(failure) => {
                tracing::warn!(
                    stage = ?failure.stage,
                    detail = %failure.detail,
                    "turn failed"
                );
                self.state.transcript_mut().finish_turn();
                let notice = match failure.stage {
                    TurnStage::UserAppend => format!("Message not sent: {}", failure.detail),
                    TurnStage::AgentAppend => format!("Reply failed: {}", failure.detail),
                };
                self.state.set_notice(notice);
            }
        }
    }
}

impl<D> ShellOrchestrator for DefaultShellOrchestrator<D>
where
    D: TurnDispatcher,
{
    fn state(&self) -> &ShellState {
        &self.state
    }

    fn handle_event(&mut self, event: AppEvent) -> Result<()> {
        match event {
            AppEvent::Tick => {}
            AppEvent::QuitRequested => self.state.stop(),
            AppEvent::InputKey(key) => self.handle_key(key),
            AppEvent::Turn(turn_event) => self.apply_turn_event(turn_event),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc, time::Duration};

    use chrono::{TimeZone, Utc};

    use crate::{
        domain::{
            events::TurnFailure,
            message::{Message, Role},
            transcript_state::TranscriptState,
        },
        infra::stubs::InMemoryHistory,
        usecases::contracts::TransportError,
    };

    use super::*;

    #[derive(Clone, Default)]
    struct StubDispatcher {
        dispatched: Rc<RefCell<Vec<String>>>,
    }

    impl TurnDispatcher for StubDispatcher {
        fn dispatch(&self, _session_id: &SessionId, text: String) {
            self.dispatched.borrow_mut().push(text);
        }
    }

    fn orchestrator() -> (DefaultShellOrchestrator<StubDispatcher>, StubDispatcher) {
        let dispatcher = StubDispatcher::default();
        let orchestrator = DefaultShellOrchestrator::new(
            ShellState::new(TranscriptState::default()),
            dispatcher.clone(),
            SessionId::new("s1"),
        );
        (orchestrator, dispatcher)
    }

    fn type_text(orchestrator: &mut DefaultShellOrchestrator<StubDispatcher>, text: &str) {
        for ch in text.chars() {
            orchestrator
                .handle_event(AppEvent::InputKey(KeyInput::new(ch.to_string(), false)))
                .expect("key must be handled");
        }
    }

    fn press(orchestrator: &mut DefaultShellOrchestrator<StubDispatcher>, key: &str) {
        orchestrator
            .handle_event(AppEvent::InputKey(KeyInput::new(key, false)))
            .expect("key must be handled");
    }

    fn stored(id: i64, role: Role, content: &str) -> Message {
        Message {
            id,
            session_id: SessionId::new("s1"),
            role,
            content: content.to_owned(),
            timestamp: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
        }
    }

    #[test]
    fn stops_on_quit_event() {
        let (mut orchestrator, _) = orchestrator();

        orchestrator
            .handle_event(AppEvent::QuitRequested)
            .expect("event must be handled");

        assert!(!orchestrator.state().is_running());
    }

    #[test]
    fn keeps_running_on_tick() {
        let (mut orchestrator, _) = orchestrator();

        orchestrator
            .handle_event(AppEvent::Tick)
            .expect("event must be handled");

        assert!(orchestrator.state().is_running());
    }

    #[test]
    fn typed_characters_land_in_the_input() {
        let (mut orchestrator, _) = orchestrator();

        type_text(&mut orchestrator, "bánh mì");

        assert_eq!(orchestrator.state().input().text(), "bánh mì");
    }

    #[test]
    fn backspace_removes_last_character() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "hi");

        press(&mut orchestrator, "backspace");

        assert_eq!(orchestrator.state().input().text(), "h");
    }

    #[test]
    fn esc_clears_the_input() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "draft");

        press(&mut orchestrator, "esc");

        assert!(orchestrator.state().input().is_empty());
    }

    #[test]
    fn enter_with_empty_input_is_a_no_op() {
        let (mut orchestrator, dispatcher) = orchestrator();

        press(&mut orchestrator, "enter");

        assert!(dispatcher.dispatched.borrow().is_empty());
        assert!(!orchestrator.state().transcript().is_awaiting_reply());
    }

    #[test]
    fn enter_with_whitespace_only_input_is_a_no_op() {
        let (mut orchestrator, dispatcher) = orchestrator();
        type_text(&mut orchestrator, "   ");

        press(&mut orchestrator, "enter");

        assert!(dispatcher.dispatched.borrow().is_empty());
    }

    #[test]
    fn enter_dispatches_the_composed_text_and_clears_input() {
        let (mut orchestrator, dispatcher) = orchestrator();
        type_text(&mut orchestrator, "đặt bánh");

        press(&mut orchestrator, "enter");

        assert_eq!(*dispatcher.dispatched.borrow(), vec!["đặt bánh".to_owned()]);
        assert!(orchestrator.state().input().is_empty());
        assert!(orchestrator.state().transcript().is_awaiting_reply());
    }

    #[test]
    fn send_while_turn_in_flight_is_rejected_not_queued() {
        let (mut orchestrator, dispatcher) = orchestrator();
        type_text(&mut orchestrator, "first");
        press(&mut orchestrator, "enter");

        type_text(&mut orchestrator, "second");
        press(&mut orchestrator, "enter");

        assert_eq!(dispatcher.dispatched.borrow().len(), 1);
        assert_eq!(orchestrator.state().notice(), Some(TURN_IN_FLIGHT_NOTICE));
        // The rejected draft stays in the input.
        assert_eq!(orchestrator.state().input().text(), "second");
    }

    #[test]
    fn user_stored_appends_and_keeps_awaiting() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");

        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::UserStored(stored(
                1,
                Role::User,
                "hello",
            ))))
            .expect("event must be handled");

        assert_eq!(orchestrator.state().transcript().len(), 1);
        assert!(orchestrator.state().transcript().is_awaiting_reply());
    }

    #[test]
    fn agent_stored_appends_and_finishes_the_turn() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");

        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::UserStored(stored(
                1,
                Role::User,
                "hello",
            ))))
            .expect("event must be handled");
        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::AgentStored(stored(
                2,
                Role::Agent,
                "reply",
            ))))
            .expect("event must be handled");

        assert_eq!(orchestrator.state().transcript().len(), 2);
        assert!(!orchestrator.state().transcript().is_awaiting_reply());
    }

    #[test]
    fn failed_user_append_leaves_transcript_unchanged() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");

        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::Failed(TurnFailure {
                stage: TurnStage::UserAppend,
                detail: "connection refused".to_owned(),
            })))
            .expect("event must be handled");

        assert!(orchestrator.state().transcript().is_empty());
        assert!(!orchestrator.state().transcript().is_awaiting_reply());
        assert!(orchestrator
            .state()
            .notice()
            .is_some_and(|notice| notice.contains("not sent")));
    }

    #[test]
    fn failed_agent_append_keeps_only_the_user_message() {
        let (mut orchestrator, _) = orchestrator();
        type_text(&mut orchestrator, "hello");
        press(&mut orchestrator, "enter");

        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::UserStored(stored(
                1,
                Role::User,
                "hello",
            ))))
            .expect("event must be handled");
        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::Failed(TurnFailure {
                stage: TurnStage::AgentAppend,
                detail: "status 500".to_owned(),
            })))
            .expect("event must be handled");

        assert_eq!(orchestrator.state().transcript().len(), 1);
        assert_eq!(
            orchestrator.state().transcript().messages()[0].role,
            Role::User
        );
        assert!(!orchestrator.state().transcript().is_awaiting_reply());
    }

    #[test]
    fn successful_submit_clears_a_previous_notice() {
        let (mut orchestrator, dispatcher) = orchestrator();
        type_text(&mut orchestrator, "first");
        press(&mut orchestrator, "enter");

        type_text(&mut orchestrator, "second");
        press(&mut orchestrator, "enter"); // rejected: turn in flight
        assert_eq!(orchestrator.state().notice(), Some(TURN_IN_FLIGHT_NOTICE));

        orchestrator
            .handle_event(AppEvent::Turn(TurnEvent::AgentStored(stored(
                2,
                Role::Agent,
                "reply",
            ))))
            .expect("event must be handled");
        press(&mut orchestrator, "enter"); // the kept draft goes through now

        assert!(orchestrator.state().notice().is_none());
        assert_eq!(dispatcher.dispatched.borrow().len(), 2);
    }

    #[test]
    fn thread_dispatcher_delivers_turn_events_over_the_channel() {
        let store = Arc::new(InMemoryHistory::default());
        let (sender, receiver) = mpsc::channel();
        let dispatcher = ThreadTurnDispatcher::new(store, sender);

        dispatcher.dispatch(&SessionId::new("s1"), "đặt bánh".to_owned());

        let first = receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("user event must arrive");
        let second = receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("agent event must arrive");

        assert!(matches!(
            first,
            AppEvent::Turn(TurnEvent::UserStored(ref message)) if message.role == Role::User
        ));
        assert!(matches!(
            second,
            AppEvent::Turn(TurnEvent::AgentStored(ref message)) if message.role == Role::Agent
        ));
    }

    #[test]
    fn thread_dispatcher_reports_transport_failure() {
        let store = Arc::new(InMemoryHistory::default());
        store.fail_append_with(TransportError::Unreachable {
            reason: "connection refused".to_owned(),
        });
        let (sender, receiver) = mpsc::channel();
        let dispatcher = ThreadTurnDispatcher::new(store, sender);

        dispatcher.dispatch(&SessionId::new("s1"), "hello".to_owned());

        let event = receiver
            .recv_timeout(Duration::from_secs(5))
            .expect("failure event must arrive");
        assert!(matches!(
            event,
            AppEvent::Turn(TurnEvent::Failed(ref failure))
                if failure.stage == TurnStage::UserAppend
        ));
    }
}
