use thiserror::Error;
use vita_config::StorageError;

/// Errors surfaced by the fallible persistence entry points
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no storage backend configured")]
    NoStorage,

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to encode persisted state: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode persisted state: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("persisted state has version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },
}
