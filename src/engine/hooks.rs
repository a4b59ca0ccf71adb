//! Creation hooks: typed callbacks that run once when an engine is built.
//!
//! A registry is an ordinary value. Populate it at startup, hand it to
//! `EngineBuilder::hooks`, and build a fresh one per test; nothing here is
//! process-wide. Callbacks are indexed by the static type of the engine they
//! accept, so a hook for `Engine<OrderState, OrderTrigger, u64, Order>` never
//! sees an engine of any other shape.

use super::machine::Engine;
use crate::core::{Entity, EntityKey, State, Trigger};
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

pub type CreationHook<S, T, K, E> = Arc<dyn Fn(&Engine<S, T, K, E>) + Send + Sync>;

#[derive(Default)]
pub struct EngineHooks {
    hooks: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl EngineHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback for engines of exactly this type.
    pub fn register<S, T, K, E, F>(&mut self, hook: F) -> &mut Self
    where
        S: State,
        T: Trigger,
        K: EntityKey,
        E: Entity,
        F: Fn(&Engine<S, T, K, E>) + Send + Sync + 'static,
    {
        let hook: CreationHook<S, T, K, E> = Arc::new(hook);
        let slot = self
            .hooks
            .entry(TypeId::of::<Engine<S, T, K, E>>())
            .or_insert_with(|| Box::new(Vec::<CreationHook<S, T, K, E>>::new()));
        if let Some(list) = slot.downcast_mut::<Vec<CreationHook<S, T, K, E>>>() {
            list.push(hook);
        }
        self
    }

    /// Callbacks registered for engines of this type, in registration order.
    pub fn resolve<S, T, K, E>(&self) -> Vec<CreationHook<S, T, K, E>>
    where
        S: State,
        T: Trigger,
        K: EntityKey,
        E: Entity,
    {
        self.hooks
            .get(&TypeId::of::<Engine<S, T, K, E>>())
            .and_then(|slot| slot.downcast_ref::<Vec<CreationHook<S, T, K, E>>>())
            .cloned()
            .unwrap_or_default()
    }

    pub fn clear(&mut self) {
        self.hooks.clear();
    }

    /// Number of distinct engine types with at least one hook.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

impl fmt::Debug for EngineHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineHooks")
            .field("engine_types", &self.hooks.len())
            .finish()
    }
}
