//! Core error types for dayoff-core.
//!
//! Nothing in this crate is fatal: the worst outcome of any error is a
//! rejected call, a disabled control or a visible acknowledgment.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for dayoff-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// TOML serialization errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Out of bounds
    #[error("Index {index} out of bounds for {collection} (length: {len})")]
    OutOfBounds {
        collection: String,
        index: usize,
        len: usize,
    },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors raised by a [`SharePlatform`](crate::share::SharePlatform).
///
/// These never escape [`share`](crate::share::share); they are folded into a
/// [`ShareOutcome`](crate::share::ShareOutcome).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShareError {
    /// The platform has no such primitive
    #[error("{0} is not available on this platform")]
    Unsupported(&'static str),

    /// The primitive exists but the call failed
    #[error("{0}")]
    Failed(String),
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
