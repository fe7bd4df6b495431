//! Key-Value Persistence Seam
//!
//! The notification registry only needs four operations, so the storage
//! backend hides behind a small trait. `MemoryStore` backs tests and
//! short-lived sessions; `JsonFileStore` persists across restarts with the
//! same write-to-temp-then-rename pattern the rest of the ecosystem uses
//! for small config files.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use tokio::fs;
use tokio::sync::RwLock;

/// Key-value store errors
#[derive(Error, Debug)]
pub enum StoreError {
    /// Reading or writing the backing file failed
    #[error("Store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file does not contain a valid string map
    #[error("Store file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Minimal persistent string map
///
/// Implementations must be `Send + Sync`; the registry shares one behind an
/// `Arc`.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn delete(&self, key: &str) -> Result<(), StoreError>;

    /// All entries whose key starts with `prefix`, sorted by key.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError>;
}

/// Volatile in-memory store
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<(String, String)> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        matching.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matching)
    }
}

/// Store persisted as one JSON object in a file
///
/// The whole map is rewritten on every mutation; entry counts here are tiny
/// (one per enabled reminder). Writes go to a temp file first and are
/// renamed into place so a crash never leaves a half-written store. A
/// mutation whose write fails is rolled back in memory.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<HashMap<String, String>>,
}

impl JsonFileStore {
    /// Open (or create) the store at `path`.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match fs::read_to_string(&path).await {
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => return Err(error.into()),
        };
        Ok(JsonFileStore {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<(), StoreError> {
        let contents = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, contents).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value);
        if let Err(error) = self.persist(&entries).await {
            // Roll back so memory never claims more than the file holds.
            match previous {
                Some(value) => entries.insert(key.to_string(), value),
                None => entries.remove(key),
            };
            return Err(error);
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };
        if let Err(error) = self.persist(&entries).await {
            entries.insert(key.to_string(), previous);
            return Err(error);
        }
        Ok(())
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<(String, String)>, StoreError> {
        let entries = self.entries.read().await;
        let mut matching: Vec<(String, String)> = entries
            .iter()
            .filter(|(key, _)| key.starts_with(prefix))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        matching.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(matching)
    }
}
