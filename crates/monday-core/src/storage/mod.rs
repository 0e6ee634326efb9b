mod config;
pub mod database;
pub mod memory;

pub use config::{Config, DisplayConfig, LogConfig, StoreBackend, StoreConfig, VoiceConfig};
pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::{ConfigError, StoreError};
use crate::streak::StreakRecord;

/// Durable mapping from user identifier to [`StreakRecord`].
///
/// A missing key is `Ok(None)`. Every failure of the underlying medium is
/// reported as a [`StoreError`].
pub trait StreakStore: Send + Sync {
    /// Fetch the record for `user_id`, if any.
    fn get(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError>;

    /// Unconditionally overwrite the record keyed by `record.user_id`.
    fn put(&self, record: &StreakRecord) -> Result<(), StoreError>;

    /// Overwrite only if the stored `lastCheckDate` still equals `expected`
    /// (`None` meaning no record or no date). Returns `false` when it does not.
    fn put_if_unchanged(
        &self,
        record: &StreakRecord,
        expected: Option<&str>,
    ) -> Result<bool, StoreError>;

    /// Remove the record for `user_id`. Returns whether one existed.
    fn delete(&self, user_id: &str) -> Result<bool, StoreError>;
}

impl<S: StreakStore + ?Sized> StreakStore for Box<S> {
    fn get(&self, user_id: &str) -> Result<Option<StreakRecord>, StoreError> {
        (**self).get(user_id)
    }

    fn put(&self, record: &StreakRecord) -> Result<(), StoreError> {
        (**self).put(record)
    }

    fn put_if_unchanged(
        &self,
        record: &StreakRecord,
        expected: Option<&str>,
    ) -> Result<bool, StoreError> {
        (**self).put_if_unchanged(record, expected)
    }

    fn delete(&self, user_id: &str) -> Result<bool, StoreError> {
        (**self).delete(user_id)
    }
}

/// Returns `~/.config/monday[-dev]/` based on MONDAY_ENV.
///
/// Set MONDAY_ENV=dev to use development data directory, or MONDAY_DATA_DIR
/// to point somewhere else entirely.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("MONDAY_DATA_DIR") {
        Some(custom) if !custom.is_empty() => PathBuf::from(custom),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");

            let env = std::env::var("MONDAY_ENV").unwrap_or_else(|_| "production".to_string());

            if env == "dev" {
                base_dir.join("monday-dev")
            } else {
                base_dir.join("monday")
            }
        }
    };

    std::fs::create_dir_all(&dir).map_err(|source| ConfigError::DataDir {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}
