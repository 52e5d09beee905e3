mod config;
pub mod database;
mod kv;

pub use config::{Config, ExportConfig, NotificationsConfig, ScheduleConfig};
pub use database::Database;
pub use kv::{KvStore, MemoryStore, HISTORY_KEY, TASKS_KEY};
#[cfg(test)]
pub(crate) use kv::backup_key;
pub(crate) use kv::{load_json_array, remove_key, save_json};

use std::path::PathBuf;

use crate::error::StorageError;

/// Returns the data directory, creating it if needed.
///
/// `DAILYDORO_HOME` overrides the location. Otherwise this is
/// `~/.config/dailydoro[-dev]/`, with the `-dev` suffix selected by
/// `DAILYDORO_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let dir = match std::env::var_os("DAILYDORO_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("DAILYDORO_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("dailydoro-dev")
            } else {
                base_dir.join("dailydoro")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
