//! Observer lists for engine events.
//!
//! Handlers run synchronously on the task that called `fire`, after the
//! transition has been committed and persisted.

use super::error::Error;
use parking_lot::RwLock;
use std::sync::Arc;

pub type StateChangedHandler<S, T> = Arc<dyn Fn(&S, &T) + Send + Sync>;
pub type TransitionFailedHandler<S, T> = Arc<dyn Fn(&S, &T, &Error) + Send + Sync>;
pub type EntityChangedHandler<E> = Arc<dyn Fn(&E) + Send + Sync>;
pub type EntityDeletedHandler<K> = Arc<dyn Fn(&K) + Send + Sync>;

pub(crate) struct Observers<S, T, K, E> {
    state_changed: RwLock<Vec<StateChangedHandler<S, T>>>,
    transition_failed: RwLock<Vec<TransitionFailedHandler<S, T>>>,
    entity_changed: RwLock<Vec<EntityChangedHandler<E>>>,
    entity_deleted: RwLock<Vec<EntityDeletedHandler<K>>>,
}

impl<S, T, K, E> Default for Observers<S, T, K, E> {
    fn default() -> Self {
        Self {
            state_changed: RwLock::new(Vec::new()),
            transition_failed: RwLock::new(Vec::new()),
            entity_changed: RwLock::new(Vec::new()),
            entity_deleted: RwLock::new(Vec::new()),
        }
    }
}

impl<S, T, K, E> Observers<S, T, K, E> {
    pub fn on_state_changed<F>(&self, handler: F)
    where
        F: Fn(&S, &T) + Send + Sync + 'static,
    {
        self.state_changed.write().push(Arc::new(handler));
    }

    pub fn on_transition_failed<F>(&self, handler: F)
    where
        F: Fn(&S, &T, &Error) + Send + Sync + 'static,
    {
        self.transition_failed.write().push(Arc::new(handler));
    }

    pub fn on_entity_changed<F>(&self, handler: F)
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.entity_changed.write().push(Arc::new(handler));
    }

    pub fn on_entity_deleted<F>(&self, handler: F)
    where
        F: Fn(&K) + Send + Sync + 'static,
    {
        self.entity_deleted.write().push(Arc::new(handler));
    }

    // Handlers are cloned out before running so one may subscribe another.

    pub fn state_changed(&self, state: &S, trigger: &T) {
        let handlers = self.state_changed.read().clone();
        for handler in handlers {
            handler(state, trigger);
        }
    }

    pub fn transition_failed(&self, state: &S, trigger: &T, error: &Error) {
        let handlers = self.transition_failed.read().clone();
        for handler in handlers {
            handler(state, trigger, error);
        }
    }

    pub fn entity_changed(&self, entity: &E) {
        let handlers = self.entity_changed.read().clone();
        for handler in handlers {
            handler(entity);
        }
    }

    pub fn entity_deleted(&self, key: &K) {
        let handlers = self.entity_deleted.read().clone();
        for handler in handlers {
            handler(key);
        }
    }

    pub fn clear(&self) {
        self.state_changed.write().clear();
        self.transition_failed.write().clear();
        self.entity_changed.write().clear();
        self.entity_deleted.write().clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.state_changed.read().len()
            + self.transition_failed.read().len()
            + self.entity_changed.read().len()
            + self.entity_deleted.read().len()
    }
}
