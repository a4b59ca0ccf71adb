//! Fluent assertions for tests that drive an [`Engine`].
//!
//! Every assertion panics with a descriptive message on failure and returns
//! the assertion value on success, so checks chain:
//!
//! ```
//! use flowline::engine::Engine;
//! use flowline::testing::ShouldExt;
//! use flowline::{state_enum, trigger_enum};
//!
//! state_enum! {
//!     enum Ticket { Open, Closed }
//! }
//! trigger_enum! {
//!     enum Action { Close }
//! }
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let mut engine = Engine::<Ticket, Action, u32, String>::new(Ticket::Open, 1, "bug".to_string());
//! engine
//!     .add_transition(Ticket::Open, Action::Close, Ticket::Closed, |_| Box::pin(async { Ok(()) }))
//!     .unwrap()
//!     .mark_final();
//!
//! engine.should().allow(Action::Close).await.be_in(Ticket::Closed);
//! engine.should().history().states(&[Ticket::Open, Ticket::Closed]);
//! engine.should().logs().reached_final_state();
//! # }
//! ```

use crate::core::{Entity, EntityKey, HistoryEntry, LogEntry, LogLevel, State, Trigger};
use crate::engine::Engine;

/// Entry point: `engine.should()`.
pub trait ShouldExt<S: State, T: Trigger, K: EntityKey, E: Entity> {
    fn should(&self) -> EngineAssertions<'_, S, T, K, E>;
}

impl<S: State, T: Trigger, K: EntityKey, E: Entity> ShouldExt<S, T, K, E> for Engine<S, T, K, E> {
    fn should(&self) -> EngineAssertions<'_, S, T, K, E> {
        EngineAssertions { engine: self }
    }
}

pub struct EngineAssertions<'e, S: State, T: Trigger, K: EntityKey, E: Entity> {
    engine: &'e Engine<S, T, K, E>,
}

impl<'e, S: State, T: Trigger, K: EntityKey, E: Entity> EngineAssertions<'e, S, T, K, E> {
    pub fn be_in(self, expected: S) -> Self {
        let actual = self.engine.current_state();
        assert_eq!(
            actual, expected,
            "expected engine to be in state '{}', but it is in '{}'",
            expected.name(),
            actual.name()
        );
        self
    }

    pub fn have_deleted_entity(self) -> Self {
        assert!(
            self.engine.current_entity().is_none(),
            "expected entity to be deleted"
        );
        self
    }

    /// Run a custom check against the current entity.
    pub fn have_entity<F>(self, check: F) -> Self
    where
        F: FnOnce(Option<&E>),
    {
        check(self.engine.current_entity().as_ref());
        self
    }

    /// Fire `trigger` and assert the state changed.
    pub async fn allow(self, trigger: T) -> Self {
        let result = self.engine.try_fire(trigger.clone()).await;
        assert!(
            matches!(result, Ok(true)),
            "expected engine to allow trigger '{}', got {:?}",
            trigger.name(),
            result
        );
        self
    }

    /// Fire `trigger` and assert the state did not change.
    pub async fn reject(self, trigger: T) -> Self {
        let result = self.engine.try_fire(trigger.clone()).await;
        assert!(
            !matches!(result, Ok(true)),
            "expected engine to reject trigger '{}', but it was allowed",
            trigger.name()
        );
        self
    }

    pub fn history(self) -> HistoryAssertions<S, T> {
        HistoryAssertions {
            entries: self.engine.history(),
        }
    }

    pub fn logs(self) -> LogAssertions {
        LogAssertions {
            entries: self.engine.logs(None),
        }
    }
}

/// Assertions over a snapshot of the transition history.
pub struct HistoryAssertions<S, T> {
    entries: Vec<HistoryEntry<T, S>>,
}

impl<S: State, T: Trigger> HistoryAssertions<S, T> {
    pub fn contains(self, trigger: T, state: S) -> Self {
        assert!(
            self.entries
                .iter()
                .any(|entry| entry.trigger.as_ref() == Some(&trigger) && entry.state == state),
            "history does not contain '{}' reached by '{}'",
            state.name(),
            trigger.name()
        );
        self
    }

    /// The recorded states, in order, must be exactly `expected`.
    pub fn states(self, expected: &[S]) -> Self {
        let actual: Vec<&S> = self.entries.iter().map(|entry| &entry.state).collect();
        let expected: Vec<&S> = expected.iter().collect();
        assert_eq!(actual, expected, "transition history mismatch");
        self
    }

    pub fn have_len(self, expected: usize) -> Self {
        assert_eq!(
            self.entries.len(),
            expected,
            "history length mismatch"
        );
        self
    }

    pub fn start_with(self, state: S) -> Self {
        let first = self.entries.first().map(|entry| &entry.state);
        assert_eq!(
            first,
            Some(&state),
            "expected history to start with '{}'",
            state.name()
        );
        self
    }

    pub fn contain_trigger(self, trigger: T) -> Self {
        assert!(
            self.entries
                .iter()
                .any(|entry| entry.trigger.as_ref() == Some(&trigger)),
            "trigger '{}' not found in history",
            trigger.name()
        );
        self
    }
}

/// Assertions over a snapshot of the engine log.
pub struct LogAssertions {
    entries: Vec<LogEntry>,
}

impl LogAssertions {
    pub fn reached_final_state(self) -> Self {
        assert!(
            self.entries
                .iter()
                .any(|entry| entry.message.contains("FSM reached final state")),
            "expected the engine to reach a final state"
        );
        self
    }

    /// Some entry at `level` must contain `text`.
    pub fn contain(self, level: LogLevel, text: &str) -> Self {
        assert!(
            self.entries
                .iter()
                .any(|entry| entry.level == level && entry.message.contains(text)),
            "expected a {level} log containing '{text}'"
        );
        self
    }

    /// Messages, in order, must be exactly `expected`.
    pub fn match_snapshot(self, expected: &[&str]) -> Self {
        let actual: Vec<&str> = self
            .entries
            .iter()
            .map(|entry| entry.message.as_str())
            .collect();
        assert_eq!(actual, expected, "log snapshot mismatch");
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{state_enum, trigger_enum};

    state_enum! {
        enum Light {
            Red,
            Green,
            Off,
        }
    }

    trigger_enum! {
        enum Switch {
            Go,
            Shutdown,
        }
    }

    fn light() -> Engine<Light, Switch, u8, String> {
        let mut engine = Engine::new(Light::Red, 1, "crossing".to_string());
        engine
            .add_transition(Light::Red, Switch::Go, Light::Green, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap()
            .add_transition(Light::Green, Switch::Shutdown, Light::Off, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap()
            .mark_final();
        engine
    }

    #[tokio::test]
    async fn passing_chain() {
        let engine = light();

        engine
            .should()
            .reject(Switch::Shutdown)
            .await
            .allow(Switch::Go)
            .await
            .allow(Switch::Shutdown)
            .await
            .be_in(Light::Off)
            .have_entity(|entity| assert_eq!(entity.map(String::as_str), Some("crossing")))
            .history()
            .start_with(Light::Red)
            .contains(Switch::Go, Light::Green)
            .contain_trigger(Switch::Shutdown)
            .states(&[Light::Red, Light::Green, Light::Off])
            .have_len(3);

        engine
            .should()
            .logs()
            .reached_final_state()
            .contain(LogLevel::Warning, "Invalid transition: Red -- (Shutdown)")
            .match_snapshot(&[
                "Initialized with state: Red",
                "Invalid transition: Red -- (Shutdown) -> ?",
                "State changed to: Green",
                "State changed to: Off",
                "FSM reached final state: Off",
            ]);
    }

    #[tokio::test]
    #[should_panic(expected = "expected engine to be in state 'Green'")]
    async fn wrong_state_panics() {
        let engine = light();
        engine.should().be_in(Light::Green);
    }

    #[tokio::test]
    #[should_panic(expected = "expected engine to allow trigger 'Shutdown'")]
    async fn disallowed_trigger_panics() {
        let engine = light();
        engine.should().allow(Switch::Shutdown).await;
    }

    #[test]
    #[should_panic(expected = "expected entity to be deleted")]
    fn present_entity_is_not_deleted() {
        light().should().have_deleted_entity();
    }
}
