//! Core error types for forgefocus-core.
//!
//! Validation errors are user-correctable and are returned from timer
//! commands; store errors propagate to whoever asked for the read or write.
//! Notification errors never leave the notification port.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for forgefocus-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Durable store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors raised by the durable store and the aggregate repository.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The stored document exists but cannot be parsed.
    #[error("stored data under '{key}' is corrupt: {message}")]
    CorruptStore { key: String, message: String },

    /// The stored document was written by an unknown schema version.
    #[error("stored data has unsupported schema version {found} (expected {expected})")]
    UnsupportedSchema { found: u64, expected: u64 },

    /// A session record failed its own invariants before being written.
    #[error("invalid session record {id}: {message}")]
    InvalidSession { id: String, message: String },

    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Backend query failed
    #[error("Store backend failed: {0}")]
    Backend(#[from] rusqlite::Error),

    /// Serializing the document failed
    #[error("Failed to serialize store document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Filesystem errors (data directory creation)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Home/data directory could not be prepared
    #[error("Cannot prepare data directory: {0}")]
    DataDir(String),
}

/// Rejections from timer commands. These are user-correctable and are
/// rendered inline by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Focus task name is empty after trimming
    #[error("Give your quest a name!")]
    EmptyTaskName,

    /// Focus task name already used today (case-insensitive)
    #[error("Task name '{0}' already used today!")]
    DuplicateTaskName(String),

    /// Command needs the countdown to be stopped first
    #[error("Timer is running; pause it first")]
    TimerActive,

    /// Command only applies while in focus mode
    #[error("Task name can only be changed before a focus interval")]
    WrongMode,

    /// Command needs a running countdown
    #[error("Timer is not running")]
    NotActive,

    /// Session config has a zero duration or reward
    #[error("Invalid value for '{field}': must be greater than zero")]
    NonPositive { field: &'static str },

    /// Preset index outside the catalog
    #[error("Preset {index} out of bounds (catalog has {len})")]
    UnknownPreset { index: usize, len: usize },
}

/// Failure to play a completion notification. Never fatal.
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification playback failed: {0}")]
    Playback(String),
}

impl From<std::io::Error> for NotificationError {
    fn from(err: std::io::Error) -> Self {
        NotificationError::Playback(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
