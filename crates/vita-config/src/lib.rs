//! Configuration and storage for the vita state store
//!
//! This crate provides:
//! - Platform paths for config and data files
//! - Configuration file loading (TOML)
//! - Store configuration (StoreConfig)
//! - The key-value storage collaborator used for persistence

pub mod config_file;
pub mod paths;
pub mod storage;
pub mod store_config;

mod file_storage;
mod memory_storage;

pub use config_file::load_config_file;
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;
pub use storage::{KeyValueStorage, StorageError};
pub use store_config::StoreConfig;
