use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::storage::{validate_key, KeyValueStorage, StorageError};

/// In-memory storage, shared between clones
///
/// Used for tests and for runs that should not touch the disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<Mutex<HashMap<String, String>>>,
    write_count: Arc<Mutex<usize>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set` calls so far
    pub fn write_count(&self) -> usize {
        self.write_count.lock().map(|count| *count).unwrap_or(0)
    }

    /// Snapshot of a stored value without going through the async interface
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn entries(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl KeyValueStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        Ok(self.entries()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries()?.insert(key.to_string(), value);
        if let Ok(mut count) = self.write_count.lock() {
            *count += 1;
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("k").await.unwrap(), None);

        storage.set("k", "v1".to_string()).await.unwrap();
        storage.set("k", "v2".to_string()).await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), Some("v2".to_string()));
        assert_eq!(storage.write_count(), 2);

        storage.remove("k").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        clone.set("shared", "yes".to_string()).await.unwrap();
        assert_eq!(storage.peek("shared"), Some("yes".to_string()));
    }

    #[tokio::test]
    async fn test_invalid_key_rejected() {
        let storage = MemoryStorage::new();
        let err = storage.set("../x", "v".to_string()).await.unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }
}
