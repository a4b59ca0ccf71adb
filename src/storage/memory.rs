//! Process-local storage backed by a concurrent map.

use super::{PersistenceAdapter, StorageResult, StoredEntry};
use crate::core::{Entity, EntityKey, State};
use async_trait::async_trait;
use dashmap::DashMap;

/// Keeps entries in memory for the lifetime of the adapter.
pub struct MemoryAdapter<S, K: EntityKey, E> {
    entries: DashMap<K, StoredEntry<S, E>>,
}

impl<S, K: EntityKey, E> MemoryAdapter<S, K, E> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S, K: EntityKey, E> Default for MemoryAdapter<S, K, E> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<S: State, K: EntityKey, E: Entity> PersistenceAdapter<S, K, E> for MemoryAdapter<S, K, E> {
    async fn save(&self, key: &K, state: &S, entity: Option<&E>) -> StorageResult<()> {
        self.entries.insert(
            key.clone(),
            StoredEntry {
                state: state.clone(),
                entity: entity.cloned(),
            },
        );
        Ok(())
    }

    async fn load_state(&self, key: &K) -> StorageResult<Option<S>> {
        Ok(self.entries.get(key).map(|entry| entry.state.clone()))
    }

    async fn load_entity(&self, key: &K) -> StorageResult<Option<E>> {
        Ok(self.entries.get(key).and_then(|entry| entry.entity.clone()))
    }

    async fn exists(&self, key: &K) -> StorageResult<bool> {
        Ok(self.entries.contains_key(key))
    }

    async fn delete(&self, key: &K) -> StorageResult<bool> {
        Ok(self.entries.remove(key).is_some())
    }
}
