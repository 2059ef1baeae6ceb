//! Core error types for focusbar-core.
//!
//! Only configuration can fail: the engine and scheduler are total over a
//! validated [`TimerSettings`](crate::timer::TimerSettings), so every error
//! here is raised before the timer loop starts. CLI commands return
//! [`Result`], and `main` prints the [`CoreError`] and exits with code 1.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for focusbar-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration directory could not be resolved or created
    #[error("Cannot prepare configuration directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Values parse but describe an impossible timer
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Validation errors for timer settings.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Not a `HH:MM` time of day
    #[error("Invalid time of day for '{field}': '{value}' (expected HH:MM)")]
    InvalidTimeOfDay { field: String, value: String },

    /// Hour outside 0..=24
    #[error("Hour {hour} for '{field}' is out of range (0-24)")]
    HourOutOfRange { field: String, hour: u32 },

    /// Start must come strictly before end
    #[error("Invalid range: {start_field} ({start}) must be before {end_field} ({end})")]
    InvalidRange {
        start_field: String,
        start: u32,
        end_field: String,
        end: u32,
    },

    /// Zero duration
    #[error("Duration '{field}' must be greater than zero")]
    ZeroDuration { field: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
