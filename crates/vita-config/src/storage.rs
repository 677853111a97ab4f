//! Key-value storage trait
//!
//! The state store persists a subset of its state through this interface.
//! Values are opaque strings (the store writes JSON); keys are short
//! identifiers such as `vita.state`.
//!
//! ```text
//! ┌──────────────────────────────┐
//! │     KeyValueStorage trait    │
//! │  - get(key)                  │
//! │  - set(key, value)           │
//! │  - remove(key)               │
//! └──────────────────────────────┘
//!               │
//!       ┌───────┴────────┐
//!       ▼                ▼
//! ┌─────────────┐  ┌─────────────┐
//! │MemoryStorage│  │ FileStorage │
//! └─────────────┘  └─────────────┘
//! ```

use async_trait::async_trait;
use std::path::PathBuf;

/// Errors raised by storage backends
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Async key-value storage
///
/// Implementations must be `Send + Sync` so the store's background writer
/// can share them with the dispatching side.
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove the value under `key`; removing a missing key is not an error
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Keys become file names, so keep them to a conservative character set
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("vita.state").is_ok());
        assert!(validate_key("user_prefs-2").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key("a/b").is_err());
    }
}
