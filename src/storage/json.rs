//! File-backed storage: one JSON document per entity type.

use super::{PersistenceAdapter, StorageError, StorageResult, StoredEntry};
use crate::core::{Entity, EntityKey, State};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Keeps every entry in memory and rewrites `storage_<entity>.json` after each
/// change.
///
/// The file is read once, when the adapter is opened. Rewrites are serialized,
/// so the document on disk is always the snapshot of the last completed write.
/// A change reaches the in-memory map only after its document was written.
pub struct JsonAdapter<S, K: EntityKey, E> {
    path: PathBuf,
    entries: DashMap<K, StoredEntry<S, E>>,
    write_lock: Mutex<()>,
}

impl<S, K, E> JsonAdapter<S, K, E>
where
    S: State,
    K: EntityKey + Serialize + DeserializeOwned,
    E: Entity + Serialize + DeserializeOwned,
{
    /// Open (or start) the store for `E` inside `directory`, creating the
    /// directory if needed.
    pub fn open(directory: impl AsRef<Path>) -> StorageResult<Self> {
        let directory = directory.as_ref();
        std::fs::create_dir_all(directory).map_err(|source| StorageError::Io {
            path: directory.to_path_buf(),
            source,
        })?;

        let path = directory.join(file_name::<E>());
        let entries: DashMap<K, StoredEntry<S, E>> = match std::fs::read_to_string(&path) {
            Ok(text) => {
                let stored: HashMap<K, StoredEntry<S, E>> = serde_json::from_str(&text)
                    .map_err(|source| StorageError::Parse {
                        path: path.clone(),
                        source,
                    })?;
                stored.into_iter().collect()
            }
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => DashMap::new(),
            Err(source) => return Err(StorageError::Io { path, source }),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened json storage");
        Ok(Self {
            path,
            entries,
            write_lock: Mutex::new(()),
        })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn snapshot(&self) -> HashMap<K, StoredEntry<S, E>> {
        self.entries
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    async fn write(&self, document: &HashMap<K, StoredEntry<S, E>>) -> StorageResult<()> {
        let text = serde_json::to_string_pretty(document).map_err(StorageError::Serialize)?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|source| StorageError::Io {
                path: self.path.clone(),
                source,
            })
    }
}

#[async_trait]
impl<S, K, E> PersistenceAdapter<S, K, E> for JsonAdapter<S, K, E>
where
    S: State,
    K: EntityKey + Serialize + DeserializeOwned,
    E: Entity + Serialize + DeserializeOwned,
{
    async fn save(&self, key: &K, state: &S, entity: Option<&E>) -> StorageResult<()> {
        let _write = self.write_lock.lock().await;
        let entry = StoredEntry {
            state: state.clone(),
            entity: entity.cloned(),
        };

        let mut document = self.snapshot();
        document.insert(key.clone(), entry.clone());
        self.write(&document).await?;

        self.entries.insert(key.clone(), entry);
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
        let _write = self.write_lock.lock().await;
        if !self.entries.contains_key(key) {
            return Ok(false);
        }

        let mut document = self.snapshot();
        document.remove(key);
        self.write(&document).await?;

        self.entries.remove(key);
        Ok(true)
    }
}

/// `storage_<type name>.json`, with the type's path and generics stripped.
fn file_name<E>() -> String {
    let full = std::any::type_name::<E>();
    let base = full.split('<').next().unwrap_or(full);
    let name = base.rsplit("::").next().unwrap_or(base);
    format!("storage_{}.json", name.to_lowercase())
}
