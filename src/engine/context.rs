//! Context handed to transition actions.

use crate::core::{Entity, State, Trigger};

/// Where an action asked the engine to go instead of the edge's configured target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Redirect<S, T> {
    pub state: S,
    pub trigger: Option<T>,
}

/// The transition in flight, as seen by its action.
///
/// The action works on a copy of the engine's entity; the engine adopts it
/// only if the action succeeds. Requests made here (`move_to`,
/// `mark_for_deletion`) are resolved by the engine after the action returns,
/// while it still holds the concurrency guard.
#[derive(Debug)]
pub struct TransitionContext<S, T, E> {
    state: S,
    trigger: T,
    entity: Option<E>,
    delete: bool,
    redirect: Option<Redirect<S, T>>,
}

impl<S: State, T: Trigger, E: Entity> TransitionContext<S, T, E> {
    pub(crate) fn new(state: S, trigger: T, entity: Option<E>) -> Self {
        Self {
            state,
            trigger,
            entity,
            delete: false,
            redirect: None,
        }
    }

    /// State the transition starts from.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Trigger being fired.
    pub fn trigger(&self) -> &T {
        &self.trigger
    }

    pub fn entity(&self) -> Option<&E> {
        self.entity.as_ref()
    }

    pub fn entity_mut(&mut self) -> Option<&mut E> {
        self.entity.as_mut()
    }

    pub fn replace_entity(&mut self, entity: E) -> Option<E> {
        self.entity.replace(entity)
    }

    /// Delete the persisted entry when this transition commits.
    pub fn mark_for_deletion(&mut self) {
        self.delete = true;
    }

    pub fn is_marked_for_deletion(&self) -> bool {
        self.delete
    }

    /// Go to `state` instead of the configured target.
    ///
    /// With a trigger, the engine commits `state` and then fires `trigger`
    /// from there. Without one, `state` is committed directly. The last call
    /// wins.
    pub fn move_to(&mut self, state: S, trigger: Option<T>) {
        self.redirect = Some(Redirect { state, trigger });
    }

    pub fn redirect(&self) -> Option<&Redirect<S, T>> {
        self.redirect.as_ref()
    }

    pub(crate) fn into_parts(self) -> (Option<E>, bool, Option<Redirect<S, T>>) {
        (self.entity, self.delete, self.redirect)
    }
}
