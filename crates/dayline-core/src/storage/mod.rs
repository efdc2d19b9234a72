mod config;
pub mod profile_store;

pub use config::{Config, LoggingConfig, PlacementConfig, ProfileDefaults};
pub use profile_store::{MemoryProfileStore, ProfileStore, SqliteProfileStore};

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the data directory, creating it if needed.
///
/// `DAYLINE_DATA_DIR` wins when set. Otherwise `~/.config/dayline[-dev]/`,
/// with `DAYLINE_ENV=dev` selecting the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("DAYLINE_DATA_DIR") {
        Some(explicit) if !explicit.is_empty() => PathBuf::from(explicit),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("DAYLINE_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("dayline-dev")
            } else {
                base_dir.join("dayline")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
