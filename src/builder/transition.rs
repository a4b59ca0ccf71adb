//! Fluent construction of transition graphs.

use crate::builder::error::ConfigError;
use crate::core::{Entity, State, Trigger};
use crate::engine::TransitionContext;
use crate::graph::TransitionGraph;
use futures::future::BoxFuture;

/// Standalone builder producing a read-only [`TransitionGraph`].
///
/// Every edge is validated as it is added. The resulting graph can be imported
/// into any number of engines with `Engine::configure_transitions`.
///
/// # Example
///
/// ```
/// use flowline::builder::GraphBuilder;
/// use flowline::{state_enum, trigger_enum};
///
/// state_enum! {
///     enum Light { Red, Green, Off }
/// }
/// trigger_enum! {
///     enum Switch { Go, Shutdown }
/// }
///
/// let mut builder = GraphBuilder::<Light, Switch, ()>::new();
/// builder
///     .add_transition(Light::Red, Switch::Go, Light::Green, |_| Box::pin(async { Ok(()) }))?
///     .add_transition(Light::Green, Switch::Shutdown, Light::Off, |_| Box::pin(async { Ok(()) }))?
///     .mark_final();
///
/// let graph = builder.build();
/// assert_eq!(graph.len(), 2);
/// assert!(graph.is_final(&Light::Off));
/// # Ok::<(), flowline::builder::ConfigError>(())
/// ```
pub struct GraphBuilder<S: State, T: Trigger, E: Entity> {
    graph: TransitionGraph<S, T, E>,
}

impl<S: State, T: Trigger, E: Entity> GraphBuilder<S, T, E> {
    pub fn new() -> Self {
        Self {
            graph: TransitionGraph::new(),
        }
    }

    /// Validate and add an edge.
    pub fn add_transition<F>(
        &mut self,
        from: S,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<EdgeHandle<'_, S, T, E>, ConfigError>
    where
        F: for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    {
        EdgeHandle::insert(&mut self.graph, from, trigger, to, action)
    }

    pub fn len(&self) -> usize {
        self.graph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.is_empty()
    }

    pub fn build(self) -> TransitionGraph<S, T, E> {
        self.graph
    }
}

impl<S: State, T: Trigger, E: Entity> Default for GraphBuilder<S, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the edge just added, for marking it final or chaining more edges.
pub struct EdgeHandle<'g, S: State, T: Trigger, E: Entity> {
    graph: &'g mut TransitionGraph<S, T, E>,
    position: usize,
}

impl<'g, S: State, T: Trigger, E: Entity> EdgeHandle<'g, S, T, E> {
    pub(crate) fn insert<F>(
        graph: &'g mut TransitionGraph<S, T, E>,
        from: S,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<Self, ConfigError>
    where
        F: for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    {
        let position = graph.insert(from, trigger, to, action)?;
        Ok(Self { graph, position })
    }

    /// Mark this edge final. Once its target is reached no further transition executes.
    pub fn mark_final(self) -> Self {
        self.graph.mark_final(self.position);
        self
    }

    /// Add another edge to the same graph.
    pub fn add_transition<F>(self, from: S, trigger: T, to: S, action: F) -> Result<Self, ConfigError>
    where
        F: for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    {
        Self::insert(self.graph, from, trigger, to, action)
    }
}
