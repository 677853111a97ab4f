//! Configuration and data directory paths
//!
//! Uses XDG directories via `dirs` crate with fallbacks.
//!
//! Platform-specific locations:
//! - Linux: `~/.config/vita/`, `~/.local/share/vita/`
//! - macOS: `~/Library/Application Support/vita/`
//! - Windows: `%APPDATA%\vita\`

use anyhow::{Context, Result};
use std::path::PathBuf;

pub const APP_NAME: &str = "vita";
pub const LOCAL_CONFIG_FILE: &str = ".vita.toml";

/// Get the application config directory
pub fn config_dir() -> Result<PathBuf> {
    let base = dirs::config_dir().context("Could not determine config directory")?;
    Ok(base.join(APP_NAME))
}

/// Get the application data directory, where persisted state lives
pub fn data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("Could not determine data directory")?;
    Ok(base.join(APP_NAME))
}

/// Get path to global config file
pub fn global_config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Get path to local config file (in CWD)
pub fn local_config_path() -> Result<PathBuf> {
    Ok(std::env::current_dir()?.join(LOCAL_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_paths() {
        let global = global_config_path().unwrap();
        assert!(global.ends_with("config.toml"));
        assert!(global.parent().unwrap().ends_with(APP_NAME));

        let local = local_config_path().unwrap();
        assert!(local.ends_with(LOCAL_CONFIG_FILE));
    }

    #[test]
    fn test_data_dir_is_app_scoped() {
        let dir = data_dir().unwrap();
        assert!(dir.ends_with(APP_NAME));
    }
}
