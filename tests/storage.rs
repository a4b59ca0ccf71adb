//! Persistence adapters exercised through the public factory.

use flowline::builder::ConfigError;
use flowline::engine::Error;
use flowline::state_enum;
use flowline::storage::{
    create_adapter, PersistenceAdapter, StorageConfig, StorageError, StorageType,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

state_enum! {
    enum Lifecycle {
        Draft,
        Review,
        Published,
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Document {
    title: String,
    revision: u32,
}

fn document(revision: u32) -> Document {
    Document {
        title: "Release notes".to_string(),
        revision,
    }
}

async fn round_trip(adapter: Arc<dyn PersistenceAdapter<Lifecycle, Uuid, Document>>) {
    let key = Uuid::new_v4();
    assert!(!adapter.exists(&key).await.unwrap());

    adapter
        .save(&key, &Lifecycle::Review, Some(&document(2)))
        .await
        .unwrap();
    assert!(adapter.exists(&key).await.unwrap());
    assert_eq!(
        adapter.load_state(&key).await.unwrap(),
        Some(Lifecycle::Review)
    );
    assert_eq!(adapter.load_entity(&key).await.unwrap(), Some(document(2)));

    assert!(adapter.delete(&key).await.unwrap());
    assert!(!adapter.delete(&key).await.unwrap());
    assert_eq!(adapter.load_state(&key).await.unwrap(), None);
}

#[tokio::test]
async fn memory_adapter_round_trip() {
    let adapter = create_adapter(&StorageConfig::memory()).unwrap();
    round_trip(adapter).await;
}

#[tokio::test]
async fn json_adapter_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = create_adapter(&StorageConfig::json(dir.path())).unwrap();
    round_trip(adapter).await;
}

#[tokio::test]
async fn json_file_is_shared_per_entity_type() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::json(dir.path().join("state"));
    let first = Uuid::new_v4();
    let second = Uuid::new_v4();

    let writer = create_adapter::<Lifecycle, Uuid, Document>(&config).unwrap();
    writer
        .save(&first, &Lifecycle::Draft, Some(&document(1)))
        .await
        .unwrap();
    writer
        .save(&second, &Lifecycle::Published, None)
        .await
        .unwrap();

    let path = dir.path().join("state").join("storage_document.json");
    let text = std::fs::read_to_string(&path).unwrap();
    let on_disk: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        on_disk[first.to_string()],
        serde_json::json!({
            "State": 0,
            "Entity": { "title": "Release notes", "revision": 1 }
        })
    );
    assert_eq!(
        on_disk[second.to_string()],
        serde_json::json!({ "State": 2, "Entity": null })
    );

    let reader = create_adapter::<Lifecycle, Uuid, Document>(&config).unwrap();
    assert_eq!(
        reader.load_state(&second).await.unwrap(),
        Some(Lifecycle::Published)
    );
    assert_eq!(reader.load_entity(&second).await.unwrap(), None);
}

#[tokio::test]
async fn concurrent_saves_leave_consistent_document() {
    let dir = tempfile::tempdir().unwrap();
    let adapter = create_adapter::<Lifecycle, u32, Document>(&StorageConfig::json(dir.path()))
        .unwrap();

    let mut tasks = Vec::new();
    for key in 0..20u32 {
        let adapter = Arc::clone(&adapter);
        tasks.push(tokio::spawn(async move {
            adapter
                .save(&key, &Lifecycle::Review, Some(&document(key)))
                .await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    let reopened =
        create_adapter::<Lifecycle, u32, Document>(&StorageConfig::json(dir.path())).unwrap();
    for key in 0..20u32 {
        assert_eq!(reopened.load_entity(&key).await.unwrap(), Some(document(key)));
    }
}

#[test]
fn malformed_document_fails_to_open() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("storage_document.json"), "[1, 2").unwrap();

    let result = create_adapter::<Lifecycle, Uuid, Document>(&StorageConfig::json(dir.path()));
    assert!(matches!(
        result,
        Err(Error::Storage(StorageError::Parse { .. }))
    ));
}

#[test]
fn storage_config_comes_from_text() {
    let config: StorageConfig =
        serde_json::from_str(r#"{ "storage": "json", "directory": "/tmp/flowline" }"#).unwrap();
    assert_eq!(config.storage, StorageType::Json);

    assert_eq!("Memory".parse::<StorageType>(), Ok(StorageType::Memory));
    assert!(matches!(
        "sqlite".parse::<StorageType>(),
        Err(ConfigError::UnknownStorage(name)) if name == "sqlite"
    ));
    assert!(matches!(
        create_adapter::<Lifecycle, Uuid, Document>(&StorageConfig {
            storage: StorageType::Json,
            directory: None,
        }),
        Err(Error::Config(ConfigError::MissingStorageDirectory))
    ));
}
