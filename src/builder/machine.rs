//! Builder for assembling engines.

use crate::builder::error::ConfigError;
use crate::core::{Entity, EntityKey, State, Trigger};
use crate::engine::{CreationHook, Engine, EngineHooks, Result};
use crate::graph::TransitionGraph;
use crate::storage::PersistenceAdapter;
use std::sync::Arc;

/// Builder for constructing engines with a fluent API.
///
/// # Example
///
/// ```
/// use flowline::builder::{EngineBuilder, GraphBuilder};
/// use flowline::storage::MemoryAdapter;
/// use flowline::{state_enum, trigger_enum};
/// use std::sync::Arc;
///
/// state_enum! {
///     enum Job { Queued, Running }
/// }
/// trigger_enum! {
///     enum Signal { Start }
/// }
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> flowline::engine::Result<()> {
/// let mut graph = GraphBuilder::<Job, Signal, String>::new();
/// graph.add_transition(Job::Queued, Signal::Start, Job::Running, |_| Box::pin(async { Ok(()) }))?;
/// let graph = graph.build();
///
/// let engine = EngineBuilder::new()
///     .initial(Job::Queued)
///     .key(42u64)
///     .entity("nightly".to_string())
///     .adapter(Arc::new(MemoryAdapter::<Job, u64, String>::new()))
///     .transitions(&graph)
///     .build()
///     .await?;
///
/// assert!(engine.fire(Signal::Start).await?);
/// # Ok(())
/// # }
/// ```
pub struct EngineBuilder<S: State, T: Trigger, K: EntityKey, E: Entity> {
    initial: Option<S>,
    key: Option<K>,
    entity: Option<E>,
    adapter: Option<Arc<dyn PersistenceAdapter<S, K, E>>>,
    graph: Option<TransitionGraph<S, T, E>>,
    hooks: Vec<CreationHook<S, T, K, E>>,
}

impl<S: State, T: Trigger, K: EntityKey, E: Entity> EngineBuilder<S, T, K, E> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            initial: None,
            key: None,
            entity: None,
            adapter: None,
            graph: None,
            hooks: Vec::new(),
        }
    }

    /// Set the initial state (required). Ignored if the adapter already
    /// holds an entry for the key.
    pub fn initial(mut self, state: S) -> Self {
        self.initial = Some(state);
        self
    }

    /// Set the entity key (required).
    pub fn key(mut self, key: K) -> Self {
        self.key = Some(key);
        self
    }

    /// Set the entity (required).
    pub fn entity(mut self, entity: E) -> Self {
        self.entity = Some(entity);
        self
    }

    pub fn adapter(mut self, adapter: Arc<dyn PersistenceAdapter<S, K, E>>) -> Self {
        self.adapter = Some(adapter);
        self
    }

    /// Import a prebuilt graph into the engine.
    pub fn transitions(mut self, graph: &TransitionGraph<S, T, E>) -> Self {
        self.graph = Some(graph.clone());
        self
    }

    /// Run the hooks registered for this engine type once the engine is built.
    pub fn hooks(mut self, registry: &EngineHooks) -> Self {
        self.hooks.extend(registry.resolve::<S, T, K, E>());
        self
    }

    /// Build the engine.
    /// Returns an error if required fields are missing.
    pub async fn build(self) -> Result<Engine<S, T, K, E>> {
        let initial = self.initial.ok_or(ConfigError::MissingInitialState)?;
        let key = self.key.ok_or(ConfigError::MissingKey)?;
        let entity = self.entity.ok_or(ConfigError::MissingEntity)?;

        let mut engine = match self.adapter {
            Some(adapter) => Engine::with_adapter(initial, adapter, key, entity).await?,
            None => Engine::new(initial, key, entity),
        };
        if let Some(graph) = &self.graph {
            engine.configure_transitions(graph)?;
        }

        for hook in &self.hooks {
            hook(&engine);
        }
        Ok(engine)
    }
}

impl<S: State, T: Trigger, K: EntityKey, E: Entity> Default for EngineBuilder<S, T, K, E> {
    fn default() -> Self {
        Self::new()
    }
}
