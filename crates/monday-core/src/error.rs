//! Core error types for monday-core.
//!
//! Storage failures are collapsed into [`StoreError`] at the store boundary so
//! nothing above it needs to know which medium backs the streak records.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for monday-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage-related errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures of the medium behind a [`crate::storage::StreakStore`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be opened or a query failed
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The store is busy or locked by another writer
    #[error("store is busy, request throttled")]
    Throttled,

    /// A row exists but cannot be decoded into a record
    #[error("malformed record for '{user_id}': {message}")]
    Malformed { user_id: String, message: String },

    /// A conditional write lost the race and the winner's state is not today's
    #[error("conflicting concurrent update for '{user_id}'")]
    Conflict { user_id: String },

    /// A lock guarding the store was poisoned by a panicking thread
    #[error("store lock poisoned")]
    Poisoned,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to resolve or create the data directory
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key not present in the configuration schema
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// An empty user identifier can never be used as a store key
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// Date string not in `YYYY-MM-DD` form
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg)
                if matches!(
                    inner.code,
                    rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
                ) =>
            {
                StoreError::Throttled
            }
            _ => StoreError::Unavailable(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
