//! Store configuration
//!
//! Configuration loaded from `.vita.toml` / `config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Tunables for the state store and its persistence
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Number of dispatched actions kept for diagnostics
    #[serde(default = "default_max_history_size")]
    pub max_history_size: usize,

    /// Quiet period before the background writer persists the latest state
    #[serde(default = "default_persist_debounce_ms")]
    pub persist_debounce_ms: u64,

    /// Key under which the persisted subset is stored
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Hemoglobin changes within this band (g/dL) count as a stable trend
    #[serde(default = "default_hemoglobin_trend_deadband")]
    pub hemoglobin_trend_deadband: f64,

    /// Maximum number of navigation breadcrumbs kept in UI state
    #[serde(default = "default_breadcrumb_limit")]
    pub breadcrumb_limit: usize,

    /// Tokens expiring within this window are reported as needing refresh
    #[serde(default = "default_token_refresh_threshold_ms")]
    pub token_refresh_threshold_ms: i64,

    /// Override for the directory holding persisted state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
}

fn default_max_history_size() -> usize {
    50
}

fn default_persist_debounce_ms() -> u64 {
    250
}

fn default_storage_key() -> String {
    "vita.state".to_string()
}

fn default_hemoglobin_trend_deadband() -> f64 {
    0.2
}

fn default_breadcrumb_limit() -> usize {
    20
}

fn default_token_refresh_threshold_ms() -> i64 {
    5 * 60 * 1000
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_history_size: default_max_history_size(),
            persist_debounce_ms: default_persist_debounce_ms(),
            storage_key: default_storage_key(),
            hemoglobin_trend_deadband: default_hemoglobin_trend_deadband(),
            breadcrumb_limit: default_breadcrumb_limit(),
            token_refresh_threshold_ms: default_token_refresh_threshold_ms(),
            data_dir: None,
        }
    }
}

impl StoreConfig {
    /// Load config from an explicit path, CWD or config directory, or use defaults
    pub fn load(explicit: Option<&Path>) -> Self {
        if let Some(content) = crate::load_config_file(explicit) {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded store config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default store config");
        Self::default()
    }

    /// Directory holding persisted state, honoring the `data_dir` override
    pub fn resolve_data_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => crate::paths::data_dir(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.max_history_size, 50);
        assert_eq!(config.storage_key, "vita.state");
        assert_eq!(config.breadcrumb_limit, 20);
        assert!((config.hemoglobin_trend_deadband - 0.2).abs() < f64::EPSILON);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_config_deserialize_partial() {
        let toml = r#"
            max_history_size = 10
            persist_debounce_ms = 0
        "#;
        let config: StoreConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.max_history_size, 10);
        assert_eq!(config.persist_debounce_ms, 0);
        // Other fields should use defaults
        assert_eq!(config.storage_key, "vita.state");
        assert_eq!(config.token_refresh_threshold_ms, 300_000);
    }

    #[test]
    fn test_data_dir_override() {
        let toml = r#"data_dir = "/tmp/vita-test""#;
        let config: StoreConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.resolve_data_dir().unwrap(),
            PathBuf::from("/tmp/vita-test")
        );
    }

    #[test]
    fn test_load_falls_back_to_defaults_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "max_history_size = \"lots\"").unwrap();

        assert_eq!(StoreConfig::load(Some(&path)), StoreConfig::default());
    }
}
