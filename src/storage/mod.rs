//! Persistence of `(state, entity)` pairs per entity key.
//!
//! Engines talk to storage only through [`PersistenceAdapter`]. Two backends
//! ship with the crate: [`MemoryAdapter`] for tests and short-lived processes,
//! and [`JsonAdapter`] which mirrors every entry of one entity type into a
//! single pretty-printed JSON file. [`create_adapter`] picks one from a
//! [`StorageConfig`].

mod error;
mod json;
mod memory;

pub use error::{StorageError, StorageResult};
pub use json::JsonAdapter;
pub use memory::MemoryAdapter;

use crate::builder::ConfigError;
use crate::core::{Entity, EntityKey, State};
use crate::engine::Error;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Storage contract used by the engine.
///
/// Implementations must be safe to share between engines; each call is
/// independent and there is no transaction across calls.
#[async_trait]
pub trait PersistenceAdapter<S: State, K: EntityKey, E: Entity>: Send + Sync {
    /// Upsert the entry for `key`.
    async fn save(&self, key: &K, state: &S, entity: Option<&E>) -> StorageResult<()>;

    async fn load_state(&self, key: &K) -> StorageResult<Option<S>>;

    async fn load_entity(&self, key: &K) -> StorageResult<Option<E>>;

    async fn exists(&self, key: &K) -> StorageResult<bool>;

    /// Remove the entry for `key`. Returns `false` if there was none.
    async fn delete(&self, key: &K) -> StorageResult<bool>;
}

/// One persisted entry, written as `{ "State": .., "Entity": .. }`.
///
/// `Entity` is always written (`null` once deleted or never set); a document
/// without it still reads back as `None`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredEntry<S, E> {
    #[serde(rename = "State")]
    pub state: S,
    #[serde(rename = "Entity")]
    pub entity: Option<E>,
}

/// Available backends.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageType {
    #[default]
    Memory,
    Json,
}

impl FromStr for StorageType {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownStorage(name.to_string())),
        }
    }
}

/// Backend selection, usually deserialized from application configuration.
///
/// ```
/// use flowline::storage::{StorageConfig, StorageType};
///
/// let config: StorageConfig =
///     serde_json::from_str(r#"{ "storage": "json", "directory": "/var/lib/orders" }"#).unwrap();
/// assert_eq!(config.storage, StorageType::Json);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub storage: StorageType,
    /// Required for [`StorageType::Json`].
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl StorageConfig {
    pub fn memory() -> Self {
        Self::default()
    }

    pub fn json(directory: impl Into<PathBuf>) -> Self {
        Self {
            storage: StorageType::Json,
            directory: Some(directory.into()),
        }
    }
}

/// Build the adapter described by `config`.
pub fn create_adapter<S, K, E>(
    config: &StorageConfig,
) -> Result<Arc<dyn PersistenceAdapter<S, K, E>>, Error>
where
    S: State,
    K: EntityKey + Serialize + DeserializeOwned,
    E: Entity + Serialize + DeserializeOwned,
{
    match config.storage {
        StorageType::Memory => Ok(Arc::new(MemoryAdapter::<S, K, E>::new())),
        StorageType::Json => {
            let directory = config
                .directory
                .as_ref()
                .ok_or(ConfigError::MissingStorageDirectory)?;
            Ok(Arc::new(JsonAdapter::<S, K, E>::open(directory)?))
        }
    }
}
