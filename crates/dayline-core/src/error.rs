//! Core error types for dayline-core.
//!
//! This module defines the error hierarchy using thiserror. Engine
//! operations report [`ScheduleError`]; persistence adapters report
//! [`StoreError`]; configuration reports [`ConfigError`]. All of them fold
//! into [`CoreError`] for callers that mix concerns.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Timeline engine errors
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Profile persistence errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the timeline engine on inconsistent input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A wall-clock string is not `HH:MM` or a field is out of range
    #[error("Invalid time format: '{input}' (expected HH:MM, 00:00-23:59)")]
    InvalidTimeFormat { input: String },

    /// A computed span is negative
    #[error("Negative duration for {field}: {start} -> {end}")]
    NegativeDuration {
        field: &'static str,
        start: String,
        end: String,
    },

    /// A habit id is not present in the supplied catalog
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),

    /// No placement matches the given id or index
    #[error("Placement not found: {0}")]
    PlacementNotFound(String),

    /// A profile field name or value could not be applied
    #[error("Invalid value for '{field}': {message}")]
    InvalidField { field: String, message: String },
}

/// Profile store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open the backing database
    #[error("Failed to open profile store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Stored document could not be decoded
    #[error("Corrupt profile document for '{user_id}': {source}")]
    CorruptDocument {
        user_id: String,
        #[source]
        source: serde_json::Error,
    },

    /// Store is locked by another writer
    #[error("Profile store is locked")]
    Locked,
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

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(inner, _msg) => {
                if inner.code == rusqlite::ErrorCode::DatabaseLocked {
                    StoreError::Locked
                } else {
                    StoreError::QueryFailed(err.to_string())
                }
            }
            _ => StoreError::QueryFailed(err.to_string()),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
