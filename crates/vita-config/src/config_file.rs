use std::path::{Path, PathBuf};

use crate::paths;

/// Load config file content with precedence: explicit path > CWD > config dir
///
/// Searches for the config in:
/// 1. The explicit path, if given
/// 2. `.vita.toml` in the current working directory
/// 3. `config.toml` in the platform config directory
///
/// Returns the file content if found, None otherwise.
pub fn load_config_file(explicit: Option<&Path>) -> Option<String> {
    if let Some(path) = explicit {
        return match std::fs::read_to_string(path) {
            Ok(content) => {
                log::debug!("Loaded config from {}", path.display());
                Some(content)
            }
            Err(e) => {
                log::warn!("Failed to read config file {}: {}", path.display(), e);
                None
            }
        };
    }

    candidate_paths().into_iter().find_map(|path| {
        let content = std::fs::read_to_string(&path).ok()?;
        log::debug!("Loaded config from {}", path.display());
        Some(content)
    })
}

fn candidate_paths() -> Vec<PathBuf> {
    [paths::local_config_path(), paths::global_config_path()]
        .into_iter()
        .filter_map(Result::ok)
        .collect()
}
