//! Core error types for mindguard-core.
//!
//! Every failure in this crate is a per-call error returned to the caller.
//! Nothing here is fatal to the process.

use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

/// Core error type for mindguard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range check-in input. Recoverable by re-prompting.
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationError),

    /// The supplied day is earlier than the stored last check-in.
    #[error(
        "Clock skew for user '{user_id}': today ({today}) is before the last check-in ({last_check_in})"
    )]
    ClockSkew {
        user_id: String,
        today: NaiveDate,
        last_check_in: NaiveDate,
    },

    /// Optimistic-concurrency writes kept losing after the retry budget.
    #[error("Persistence conflict for user '{user_id}' after {attempts} attempt(s)")]
    PersistenceConflict { user_id: String, attempts: u32 },

    /// Storage collaborator errors
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Conversational companion errors
    #[error("Companion error: {0}")]
    Companion(#[from] CompanionError),
}

/// Check-in input validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field was empty or absent
    #[error("'{field}' is required")]
    Missing { field: &'static str },

    /// The field could not be parsed as a finite number
    #[error("'{field}' must be a number, got '{value}'")]
    NotNumeric { field: &'static str, value: String },

    /// The field is below its lower bound
    #[error("'{field}' must be at least {min}, got {value}")]
    BelowMinimum {
        field: &'static str,
        value: f64,
        min: f64,
    },

    /// The field is outside its declared closed range
    #[error("'{field}' must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

/// Errors raised by streak and report stores.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Conditional write lost against a concurrent writer
    #[error("Conditional write rejected for user '{user_id}': stored record changed")]
    Conflict { user_id: String },

    /// SQLite failure
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored row could not be decoded
    #[error("Corrupt stored value: {0}")]
    Corrupt(String),

    /// The data directory could not be prepared
    #[error("Failed to prepare data directory: {0}")]
    DataDir(#[from] std::io::Error),
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
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Conversational companion errors.
#[derive(Error, Debug)]
pub enum CompanionError {
    /// Companion disabled or credentials missing
    #[error("Companion is not configured: {0}")]
    NotConfigured(String),

    /// Nothing to send
    #[error("Message required")]
    EmptyMessage,

    /// Transport failure
    #[error("Companion request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status
    #[error("Companion service unavailable: HTTP {status}")]
    Unavailable { status: u16 },

    /// The endpoint answered but without a usable reply
    #[error("Malformed companion response: {0}")]
    MalformedResponse(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
