//! Transition graphs: the `(state, trigger) -> state` edge set of one machine shape.
//!
//! A graph is validated edge by edge as it is built: self-loops, cycles and
//! duplicate keys are rejected. Once built it can be imported into any number
//! of engines; actions are shared behind `Arc`, so cloning a graph is cheap.

mod validate;

use crate::builder::ConfigError;
use crate::core::{Entity, State, Trigger};
use crate::engine::TransitionContext;
use crate::export::{self, ExportFormat};
use futures::future::BoxFuture;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

/// Shared transition action.
///
/// Actions receive the context of the transition in flight and may perform
/// arbitrary async work. Returning `Err` (or panicking) fails the transition.
pub type TransitionAction<S, T, E> = Arc<
    dyn for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
        + Send
        + Sync,
>;

/// Unique identity of an edge.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransitionKey<S, T> {
    pub from: S,
    pub trigger: T,
}

/// What happens when an edge is taken.
pub struct TransitionDefinition<S, T, E> {
    pub target: S,
    pub is_final: bool,
    pub action: TransitionAction<S, T, E>,
}

impl<S: Clone, T, E> Clone for TransitionDefinition<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            target: self.target.clone(),
            is_final: self.is_final,
            action: Arc::clone(&self.action),
        }
    }
}

impl<S: fmt::Debug, T, E> fmt::Debug for TransitionDefinition<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDefinition")
            .field("target", &self.target)
            .field("is_final", &self.is_final)
            .finish_non_exhaustive()
    }
}

/// One registered edge.
pub struct Transition<S, T, E> {
    pub key: TransitionKey<S, T>,
    pub definition: TransitionDefinition<S, T, E>,
}

impl<S: fmt::Debug, T: fmt::Debug, E> fmt::Debug for Transition<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("key", &self.key)
            .field("definition", &self.definition)
            .finish()
    }
}

impl<S: Clone, T: Clone, E> Clone for Transition<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            definition: self.definition.clone(),
        }
    }
}

/// Validated edge set plus the states marked final.
///
/// Edges keep their insertion order, which makes export deterministic.
pub struct TransitionGraph<S: State, T: Trigger, E: Entity> {
    edges: Vec<Transition<S, T, E>>,
    index: HashMap<TransitionKey<S, T>, usize>,
    final_states: HashSet<S>,
}

impl<S: State, T: Trigger, E: Entity> Default for TransitionGraph<S, T, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State, T: Trigger, E: Entity> Clone for TransitionGraph<S, T, E> {
    fn clone(&self) -> Self {
        Self {
            edges: self.edges.clone(),
            index: self.index.clone(),
            final_states: self.final_states.clone(),
        }
    }
}

impl<S: State, T: Trigger, E: Entity> fmt::Debug for TransitionGraph<S, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionGraph")
            .field("edges", &self.edges)
            .field("final_states", &self.final_states)
            .finish()
    }
}

impl<S: State, T: Trigger, E: Entity> TransitionGraph<S, T, E> {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            index: HashMap::new(),
            final_states: HashSet::new(),
        }
    }

    /// Start a standalone builder.
    pub fn builder() -> crate::builder::GraphBuilder<S, T, E> {
        crate::builder::GraphBuilder::new()
    }

    /// Validate and append an edge, returning its position.
    pub(crate) fn insert<F>(
        &mut self,
        from: S,
        trigger: T,
        to: S,
        action: F,
    ) -> Result<usize, ConfigError>
    where
        F: for<'a> Fn(&'a mut TransitionContext<S, T, E>) -> BoxFuture<'a, anyhow::Result<()>>
            + Send
            + Sync
            + 'static,
    {
        self.insert_shared(from, trigger, to, Arc::new(action))
    }

    pub(crate) fn insert_shared(
        &mut self,
        from: S,
        trigger: T,
        to: S,
        action: TransitionAction<S, T, E>,
    ) -> Result<usize, ConfigError> {
        validate::check_acyclic(self, &from, &to)?;
        validate::check_unique(self, &from, &trigger, &to)?;

        let key = TransitionKey { from, trigger };
        let position = self.edges.len();
        self.index.insert(key.clone(), position);
        self.edges.push(Transition {
            key,
            definition: TransitionDefinition {
                target: to,
                is_final: false,
                action,
            },
        });
        Ok(position)
    }

    /// Mark the edge at `position` final; its target joins the final-state set.
    pub(crate) fn mark_final(&mut self, position: usize) {
        if let Some(edge) = self.edges.get_mut(position) {
            edge.definition.is_final = true;
            self.final_states.insert(edge.definition.target.clone());
        }
    }

    pub fn get(&self, from: &S, trigger: &T) -> Option<&TransitionDefinition<S, T, E>> {
        let key = TransitionKey {
            from: from.clone(),
            trigger: trigger.clone(),
        };
        self.index
            .get(&key)
            .map(|&position| &self.edges[position].definition)
    }

    pub fn contains(&self, from: &S, trigger: &T) -> bool {
        self.get(from, trigger).is_some()
    }

    pub fn is_final(&self, state: &S) -> bool {
        self.final_states.contains(state)
    }

    pub fn final_states(&self) -> &HashSet<S> {
        &self.final_states
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Transition<S, T, E>> {
        self.edges.iter()
    }

    /// Triggers accepted from `state`, in insertion order.
    pub fn triggers_from<'g>(&'g self, state: &'g S) -> impl Iterator<Item = &'g T> + 'g {
        self.edges
            .iter()
            .filter(move |edge| &edge.key.from == state)
            .map(|edge| &edge.key.trigger)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn export(&self, format: ExportFormat) -> String {
        export::render(self, format)
    }

    pub(crate) fn clear(&mut self) {
        self.edges.clear();
        self.index.clear();
        self.final_states.clear();
    }
}
