use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for named key-value slots.
///
/// Each slot holds one opaque string value. Writes overwrite whatever was
/// there; there is no versioning because the app is the only writer.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    async fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn write_slot(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    slots: Arc<Mutex<HashMap<String, String>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SlotRepository for InMemoryRepository {
    async fn read_slot(&self, key: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(key).cloned())
    }

    async fn write_slot(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .slots
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub slots: Arc<dyn SlotRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let slots: Arc<dyn SlotRepository> = Arc::new(InMemoryRepository::new());
        Self { slots }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_slot_reads_as_none() {
        let repo = InMemoryRepository::new();
        assert!(repo.read_slot("progress").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn write_overwrites_previous_value() {
        let repo = InMemoryRepository::new();
        repo.write_slot("progress", "[1]").await.unwrap();
        repo.write_slot("progress", "[2]").await.unwrap();
        repo.write_slot("other", "x").await.unwrap();

        assert_eq!(
            repo.read_slot("progress").await.unwrap().as_deref(),
            Some("[2]")
        );
        assert_eq!(repo.read_slot("other").await.unwrap().as_deref(), Some("x"));
    }

    #[tokio::test]
    async fn clones_share_the_same_slots() {
        let repo = InMemoryRepository::new();
        let storage = Storage {
            slots: Arc::new(repo.clone()),
        };
        storage.slots.write_slot("k", "v").await.unwrap();
        assert_eq!(repo.read_slot("k").await.unwrap().as_deref(), Some("v"));
    }
}
