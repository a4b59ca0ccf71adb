//! The engine: one keyed entity driven through a transition graph.
//!
//! Firing is serialized per engine by a [`ConcurrencyGuard`]. The guard owns
//! the mutable machine (graph plus pending flags) and is held for the whole
//! protocol, across action awaits and storage I/O, so two concurrent `fire`
//! calls never interleave. Readers of the current state and entity go through
//! a snapshot that is only written while the guard is held.

use super::context::{Redirect, TransitionContext};
use super::error::{Error, Result, TransitionFailure};
use super::events::Observers;
use crate::builder::{ConfigError, EdgeHandle};
use crate::core::{
    ConcurrencyGuard, Entity, EntityKey, EngineLog, HistoryEntry, LogEntry, LogLevel, State,
    TransitionHistory, Trigger,
};
use crate::export::{self, ExportFormat};
use crate::graph::TransitionGraph;
use crate::storage::PersistenceAdapter;
use futures::future::{BoxFuture, FutureExt};
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::Instrument;

/// How the graph of an engine was populated. The two styles are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ConfigStyle {
    Unset,
    Direct,
    Bulk,
}

/// Everything the firing protocol mutates, owned by the guard.
struct Machine<S: State, T: Trigger, E: Entity> {
    graph: TransitionGraph<S, T, E>,
    style: ConfigStyle,
    pending_deletion: bool,
}

struct Snapshot<S, E> {
    state: S,
    entity: Option<E>,
}

/// A finite-state machine bound to one entity.
///
/// # Example
///
/// ```
/// use flowline::engine::Engine;
/// use flowline::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Door { Closed, Open }
/// }
/// trigger_enum! {
///     enum Push { Open }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> flowline::engine::Result<()> {
/// let mut engine = Engine::<Door, Push, u32, String>::new(Door::Closed, 1, "front".to_string());
/// engine.add_transition(Door::Closed, Push::Open, Door::Open, |_| Box::pin(async { Ok(()) }))?;
///
/// assert!(engine.fire(Push::Open).await?);
/// assert_eq!(engine.current_state(), Door::Open);
/// # Ok(())
/// # }
/// ```
pub struct Engine<S: State, T: Trigger, K: EntityKey, E: Entity> {
    key: K,
    adapter: Option<Arc<dyn PersistenceAdapter<S, K, E>>>,
    guard: ConcurrencyGuard<Machine<S, T, E>>,
    snapshot: RwLock<Snapshot<S, E>>,
    history: TransitionHistory<S, T>,
    log: EngineLog,
    observers: Observers<S, T, K, E>,
    disposed: AtomicBool,
}

impl<S: State, T: Trigger, K: EntityKey, E: Entity> Engine<S, T, K, E> {
    /// Engine without persistence.
    pub fn new(initial: S, key: K, entity: E) -> Self {
        let engine = Self::assemble(initial, key, entity, None);
        engine.announce();
        engine
    }

    /// Engine backed by `adapter`.
    ///
    /// If the adapter holds nothing for `key` it is seeded with `initial` and
    /// `entity`; otherwise the stored state and entity win.
    pub async fn with_adapter(
        initial: S,
        adapter: Arc<dyn PersistenceAdapter<S, K, E>>,
        key: K,
        entity: E,
    ) -> Result<Self> {
        if !adapter.exists(&key).await? {
            adapter.save(&key, &initial, Some(&entity)).await?;
        }

        let engine = Self::assemble(initial, key, entity, Some(adapter));
        engine.reload().await?;
        engine.announce();
        Ok(engine)
    }

    fn assemble(
        initial: S,
        key: K,
        entity: E,
        adapter: Option<Arc<dyn PersistenceAdapter<S, K, E>>>,
    ) -> Self {
        let log = EngineLog::new(format!("{key:?}"));
        Self {
            key,
            adapter,
            guard: ConcurrencyGuard::new(Machine {
                graph: TransitionGraph::new(),
                style: ConfigStyle::Unset,
                pending_deletion: false,
            }),
            snapshot: RwLock::new(Snapshot {
                state: initial,
                entity: Some(entity),
            }),
            history: TransitionHistory::new(),
            log,
            observers: Observers::default(),
            disposed: AtomicBool::new(false),
        }
    }

    fn announce(&self) {
        let state = self.current_state();
        self.history.record_seed(state.clone());
        self.log
            .info(format!("Initialized with state: {}", state.name()));
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn current_state(&self) -> S {
        self.snapshot.read().state.clone()
    }

    /// `None` once the entity has been deleted.
    pub fn current_entity(&self) -> Option<E> {
        self.snapshot.read().entity.clone()
    }

    /// Whether the current state is the target of a final edge.
    pub async fn is_final(&self) -> bool {
        let machine = self.guard.acquire().await;
        machine.graph.is_final(&self.current_state())
    }

    /// Retained history, oldest first. The first entry is the seed `(None, initial)`
    /// until it is evicted.
    pub fn history(&self) -> Vec<HistoryEntry<T, S>> {
        self.history.entries()
    }

    pub fn logs(&self, level: Option<LogLevel>) -> Vec<LogEntry> {
        self.log.entries(level)
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn ensure_live(&self) -> std::result::Result<(), ConfigError> {
        if self.is_disposed() {
            return Err(ConfigError::Disposed);
        }
        Ok(())
    }

    /// Add an edge directly to this engine's graph.
    ///
    /// Cannot be combined with [`configure_transitions`](Self::configure_transitions).
    pub fn add_transition<F>(
        &mut self,
        from: S,
        trigger: T,
        to: S,
        action: F,
    ) -> std::result::Result<EdgeHandle<'_, S, T, E>, ConfigError>
    where
        F: for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    {
        self.ensure_live()?;
        let machine = self.guard.get_mut();
        if machine.style == ConfigStyle::Bulk {
            return Err(ConfigError::MixedConfiguration);
        }
        machine.style = ConfigStyle::Direct;
        EdgeHandle::insert(&mut machine.graph, from, trigger, to, action)
    }

    /// Import a prebuilt graph. Edges and final states are copied; actions are shared.
    pub fn configure_transitions(
        &mut self,
        graph: &TransitionGraph<S, T, E>,
    ) -> std::result::Result<&mut Self, ConfigError> {
        self.ensure_live()?;
        let machine = self.guard.get_mut();
        match machine.style {
            ConfigStyle::Bulk => return Err(ConfigError::MixedConfiguration),
            ConfigStyle::Direct if !machine.graph.is_empty() => {
                return Err(ConfigError::MixedConfiguration)
            }
            _ => {}
        }
        if graph.is_empty() {
            return Err(ConfigError::NoTransitions);
        }

        machine.graph = graph.clone();
        machine.style = ConfigStyle::Bulk;
        Ok(self)
    }

    pub fn on_state_changed<F>(&self, handler: F)
    where
        F: Fn(&S, &T) + Send + Sync + 'static,
    {
        self.observers.on_state_changed(handler);
    }

    /// Called with the state the engine was in when an action failed.
    pub fn on_transition_failed<F>(&self, handler: F)
    where
        F: Fn(&S, &T, &Error) + Send + Sync + 'static,
    {
        self.observers.on_transition_failed(handler);
    }

    pub fn on_entity_changed<F>(&self, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.observers.on_entity_changed(handler);
    }

    pub fn on_entity_deleted<F>(&self, handler: F)
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        self.observers.on_entity_deleted(handler);
    }

    /// Fire `trigger`.
    ///
    /// Returns `Ok(true)` if the state changed. Invalid triggers, terminal
    /// states and failed actions all yield `Ok(false)`; failures are logged
    /// and reported to `on_transition_failed`. Only a disposed engine or a
    /// storage failure produces `Err`.
    ///
    /// The adapter is reloaded on every redirect. Another engine writing the
    /// same key between two redirects is overwritten by the later commit;
    /// across engines the last writer wins.
    pub async fn fire(&self, trigger: T) -> Result<bool> {
        match self.try_fire(trigger).await {
            Err(Error::Transition(_)) => Ok(false),
            other => other,
        }
    }

    /// Like [`fire`](Self::fire) but a failed action is returned as
    /// [`Error::Transition`].
    pub async fn try_fire(&self, trigger: T) -> Result<bool> {
        let span = tracing::info_span!("fire", key = ?self.key, trigger = trigger.name());
        async move {
            self.ensure_live()?;
            let mut machine = self.guard.acquire().await;
            // dispose may have won the race for the guard
            self.ensure_live()?;

            let result = self.fire_locked(&mut machine, trigger.clone()).await;
            if let Err(error) = &result {
                if !matches!(error, Error::Config(_)) {
                    self.log
                        .error(format!("Exception during transition: {error}"));
                    let state = self.current_state();
                    self.observers.transition_failed(&state, &trigger, error);
                }
            }
            result
        }
        .instrument(span)
        .await
    }

    fn fire_locked<'a>(
        &'a self,
        machine: &'a mut Machine<S, T, E>,
        trigger: T,
    ) -> BoxFuture<'a, Result<bool>> {
        Box::pin(async move {
            self.reload().await?;

            let state = self.current_state();
            if machine.graph.is_final(&state) {
                self.log
                    .info(format!("FSM reached final state: {}", state.name()));
                return Ok(false);
            }

            let Some(definition) = machine.graph.get(&state, &trigger).cloned() else {
                self.log.warning(format!(
                    "Invalid transition: {} -- ({}) -> ?",
                    state.name(),
                    trigger.name()
                ));
                return Ok(false);
            };

            let mut ctx = TransitionContext::new(state.clone(), trigger.clone(), self.current_entity());
            let action = Arc::clone(&definition.action);
            let outcome = AssertUnwindSafe(async { action(&mut ctx).await })
                .catch_unwind()
                .await;
            match outcome {
                Ok(Ok(())) => {}
                Ok(Err(source)) => {
                    return Err(TransitionFailure::ActionFailed {
                        state: state.name().to_string(),
                        trigger: trigger.name().to_string(),
                        source,
                    }
                    .into())
                }
                Err(payload) => {
                    return Err(TransitionFailure::ActionPanicked {
                        state: state.name().to_string(),
                        trigger: trigger.name().to_string(),
                        message: panic_message(payload),
                    }
                    .into())
                }
            }

            let (entity, delete, redirect) = ctx.into_parts();
            if delete {
                machine.pending_deletion = true;
            }

            match redirect {
                Some(Redirect {
                    state: next_state,
                    trigger: Some(next_trigger),
                }) => {
                    let changed = self
                        .commit(machine, next_state, next_trigger.clone(), entity)
                        .await?;
                    let refired = self.fire_locked(&mut *machine, next_trigger).await?;
                    Ok(changed || refired)
                }
                Some(Redirect {
                    state: next_state,
                    trigger: None,
                }) => self.commit(machine, next_state, trigger, entity).await,
                None => {
                    self.commit(machine, definition.target, trigger, entity)
                        .await
                }
            }
        })
    }

    async fn commit(
        &self,
        machine: &mut Machine<S, T, E>,
        state: S,
        trigger: T,
        entity: Option<E>,
    ) -> Result<bool> {
        if self.current_state() == state {
            self.snapshot.write().entity = entity;
            return Ok(false);
        }

        let deleting = machine.pending_deletion;
        let entity = if deleting { None } else { entity };
        if let Some(adapter) = &self.adapter {
            if deleting {
                adapter.delete(&self.key).await?;
            } else {
                adapter.save(&self.key, &state, entity.as_ref()).await?;
            }
        }
        machine.pending_deletion = false;

        {
            let mut snapshot = self.snapshot.write();
            snapshot.state = state.clone();
            snapshot.entity = entity.clone();
        }
        self.history.record(trigger.clone(), state.clone());
        self.log
            .info(format!("State changed to: {}", state.name()));

        self.observers.state_changed(&state, &trigger);
        if deleting {
            self.observers.entity_deleted(&self.key);
        } else if let Some(entity) = &entity {
            self.observers.entity_changed(entity);
        }

        if machine.graph.is_final(&state) {
            self.log
                .info(format!("FSM reached final state: {}", state.name()));
        }
        Ok(true)
    }

    /// Pull the persisted state and entity, keeping local values the adapter lacks.
    async fn reload(&self) -> Result<()> {
        let Some(adapter) = &self.adapter else {
            return Ok(());
        };
        let state = adapter.load_state(&self.key).await?;
        let entity = adapter.load_entity(&self.key).await?;

        let mut snapshot = self.snapshot.write();
        if let Some(state) = state {
            snapshot.state = state;
        }
        if let Some(entity) = entity {
            snapshot.entity = Some(entity);
        }
        Ok(())
    }

    /// Render the engine's graph.
    pub async fn export(&self, format: ExportFormat) -> std::result::Result<String, ConfigError> {
        self.ensure_live()?;
        let machine = self.guard.acquire().await;
        Ok(export::render(&machine.graph, format))
    }

    /// Release the graph, history and subscribers. Later configuration,
    /// firing and export fail with [`ConfigError::Disposed`].
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        let mut machine = self.guard.acquire().await;
        machine.graph.clear();
        machine.pending_deletion = false;
        self.history.clear();
        self.observers.clear();
    }
}

impl<S: State, T: Trigger, K: EntityKey, E: Entity> fmt::Debug for Engine<S, T, K, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("key", &self.key)
            .field("state", &self.current_state())
            .field("persistent", &self.adapter.is_some())
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryAdapter;
    use crate::{state_enum, trigger_enum};
    use std::sync::atomic::AtomicUsize;

    state_enum! {
        enum TaskState {
            Todo,
            Doing,
            Done,
            Failed,
        }
    }

    trigger_enum! {
        enum TaskTrigger {
            Start,
            Finish,
            Abort,
        }
    }

    type TaskEngine = Engine<TaskState, TaskTrigger, u32, String>;

    fn explode() -> anyhow::Result<()> {
        panic!("boom")
    }

    fn task_engine() -> TaskEngine {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "write docs".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap()
            .add_transition(TaskState::Doing, TaskTrigger::Finish, TaskState::Done, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap()
            .mark_final();
        engine
    }

    #[tokio::test]
    async fn new_engine_is_seeded() {
        let engine = task_engine();

        assert_eq!(engine.current_state(), TaskState::Todo);
        assert_eq!(engine.history(), vec![HistoryEntry::seed(TaskState::Todo)]);
        assert_eq!(
            engine.logs(None)[0].message,
            "Initialized with state: Todo"
        );
        assert!(!engine.is_final().await);
    }

    #[tokio::test]
    async fn fire_follows_configured_edge() {
        let engine = task_engine();

        assert!(engine.fire(TaskTrigger::Start).await.unwrap());
        assert!(engine.fire(TaskTrigger::Finish).await.unwrap());

        assert_eq!(engine.current_state(), TaskState::Done);
        assert!(engine.is_final().await);
        assert_eq!(
            engine.history().last(),
            Some(&HistoryEntry::new(TaskTrigger::Finish, TaskState::Done))
        );
    }

    #[tokio::test]
    async fn unknown_trigger_is_a_warning() {
        let engine = task_engine();

        assert!(!engine.fire(TaskTrigger::Finish).await.unwrap());
        let warnings = engine.logs(Some(LogLevel::Warning));
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "Invalid transition: Todo -- (Finish) -> ?");
    }

    #[tokio::test]
    async fn action_edits_are_adopted() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "draft".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |ctx| {
                Box::pin(async move {
                    if let Some(entity) = ctx.entity_mut() {
                        entity.push_str(" v2");
                    }
                    Ok(())
                })
            })
            .unwrap();

        engine.fire(TaskTrigger::Start).await.unwrap();
        assert_eq!(engine.current_entity().as_deref(), Some("draft v2"));
    }

    #[tokio::test]
    async fn failing_action_leaves_state_untouched() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "draft".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |ctx| {
                Box::pin(async move {
                    ctx.replace_entity("clobbered".to_string());
                    anyhow::bail!("disk full")
                })
            })
            .unwrap();
        let failures = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&failures);
        engine.on_transition_failed(move |state, _, _| {
            assert_eq!(state, &TaskState::Todo);
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!engine.fire(TaskTrigger::Start).await.unwrap());
        assert!(matches!(
            engine.try_fire(TaskTrigger::Start).await,
            Err(Error::Transition(TransitionFailure::ActionFailed { .. }))
        ));

        assert_eq!(engine.current_state(), TaskState::Todo);
        assert_eq!(engine.current_entity().as_deref(), Some("draft"));
        assert_eq!(failures.load(Ordering::SeqCst), 2);
        assert_eq!(engine.logs(Some(LogLevel::Error)).len(), 2);
    }

    #[tokio::test]
    async fn panicking_action_is_contained() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "draft".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |_| {
                Box::pin(async { explode() })
            })
            .unwrap();

        let result = engine.try_fire(TaskTrigger::Start).await;
        match result {
            Err(Error::Transition(TransitionFailure::ActionPanicked { message, .. })) => {
                assert_eq!(message, "boom")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(engine.current_state(), TaskState::Todo);
    }

    #[tokio::test]
    async fn redirect_without_trigger_commits_directly() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "draft".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |ctx| {
                Box::pin(async move {
                    ctx.move_to(TaskState::Failed, None);
                    Ok(())
                })
            })
            .unwrap();

        assert!(engine.fire(TaskTrigger::Start).await.unwrap());
        assert_eq!(engine.current_state(), TaskState::Failed);
        assert_eq!(
            engine.history().last(),
            Some(&HistoryEntry::new(TaskTrigger::Start, TaskState::Failed))
        );
    }

    #[tokio::test]
    async fn redirect_to_current_state_only_adopts_entity() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, "draft".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |ctx| {
                Box::pin(async move {
                    ctx.replace_entity("retried".to_string());
                    ctx.move_to(TaskState::Todo, None);
                    Ok(())
                })
            })
            .unwrap();
        let changes = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&changes);
        engine.on_state_changed(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        assert!(!engine.fire(TaskTrigger::Start).await.unwrap());
        assert_eq!(engine.current_entity().as_deref(), Some("retried"));
        assert_eq!(engine.history().len(), 1);
        assert_eq!(changes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn deletion_without_adapter_drops_entity() {
        let mut engine = TaskEngine::new(TaskState::Todo, 9, "temp".to_string());
        engine
            .add_transition(TaskState::Todo, TaskTrigger::Abort, TaskState::Failed, |ctx| {
                Box::pin(async move {
                    ctx.mark_for_deletion();
                    Ok(())
                })
            })
            .unwrap();
        let deleted = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&deleted);
        engine.on_entity_deleted(move |key| sink.lock().push(*key));
        engine.on_entity_changed(|_| panic!("entity change after deletion"));

        assert!(engine.fire(TaskTrigger::Abort).await.unwrap());
        assert_eq!(engine.current_entity(), None);
        assert_eq!(*deleted.lock(), vec![9]);
    }

    #[tokio::test]
    async fn adapter_state_wins_over_initial() {
        let adapter = Arc::new(MemoryAdapter::<TaskState, u32, String>::new());
        adapter
            .save(&5, &TaskState::Doing, Some(&"stored".to_string()))
            .await
            .unwrap();

        let engine =
            TaskEngine::with_adapter(TaskState::Todo, adapter.clone(), 5, "fresh".to_string())
                .await
                .unwrap();

        assert_eq!(engine.current_state(), TaskState::Doing);
        assert_eq!(engine.current_entity().as_deref(), Some("stored"));
        assert_eq!(engine.history(), vec![HistoryEntry::seed(TaskState::Doing)]);
    }

    #[tokio::test]
    async fn missing_key_is_seeded_into_adapter() {
        let adapter = Arc::new(MemoryAdapter::<TaskState, u32, String>::new());

        let _engine =
            TaskEngine::with_adapter(TaskState::Todo, adapter.clone(), 3, "fresh".to_string())
                .await
                .unwrap();

        assert!(adapter.exists(&3).await.unwrap());
        assert_eq!(adapter.load_state(&3).await.unwrap(), Some(TaskState::Todo));
    }

    #[test]
    fn bulk_then_direct_is_rejected() {
        let mut builder = TransitionGraph::<TaskState, TaskTrigger, String>::builder();
        builder
            .add_transition(TaskState::Todo, TaskTrigger::Start, TaskState::Doing, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap();
        let graph = builder.build();

        let mut engine = TaskEngine::new(TaskState::Todo, 1, String::new());
        engine.configure_transitions(&graph).unwrap();

        let result = engine.add_transition(TaskState::Doing, TaskTrigger::Finish, TaskState::Done, |_| {
            Box::pin(async { Ok(()) })
        });
        assert!(matches!(result, Err(ConfigError::MixedConfiguration)));
        assert!(matches!(
            engine.configure_transitions(&graph),
            Err(ConfigError::MixedConfiguration)
        ));
    }

    #[test]
    fn direct_then_bulk_is_rejected() {
        let mut builder = TransitionGraph::<TaskState, TaskTrigger, String>::builder();
        builder
            .add_transition(TaskState::Doing, TaskTrigger::Finish, TaskState::Done, |_| {
                Box::pin(async { Ok(()) })
            })
            .unwrap();
        let graph = builder.build();

        let mut engine = task_engine();
        assert!(matches!(
            engine.configure_transitions(&graph),
            Err(ConfigError::MixedConfiguration)
        ));
    }

    #[test]
    fn empty_bulk_import_is_rejected() {
        let mut engine = TaskEngine::new(TaskState::Todo, 1, String::new());
        let graph = TransitionGraph::new();

        assert!(matches!(
            engine.configure_transitions(&graph),
            Err(ConfigError::NoTransitions)
        ));
    }

    #[tokio::test]
    async fn disposed_engine_refuses_work() {
        let mut engine = task_engine();
        engine.dispose().await;
        engine.dispose().await;

        assert!(engine.is_disposed());
        assert!(engine.history().is_empty());
        assert!(matches!(
            engine.fire(TaskTrigger::Start).await,
            Err(Error::Config(ConfigError::Disposed))
        ));
        assert!(matches!(
            engine.export(ExportFormat::Mermaid).await,
            Err(ConfigError::Disposed)
        ));
        assert!(matches!(
            engine.add_transition(TaskState::Done, TaskTrigger::Abort, TaskState::Failed, |_| {
                Box::pin(async { Ok(()) })
            }),
            Err(ConfigError::Disposed)
        ));
    }
}
