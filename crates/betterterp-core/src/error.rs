//! Core error types for betterterp-core.
//!
//! This module defines the error hierarchy using thiserror. Failures that the
//! home view is expected to absorb (absent or malformed persisted state, a
//! failed habit listing) never surface here; they degrade to defaults at the
//! call site and are logged instead.

use std::path::PathBuf;
use thiserror::Error;

/// Message shown to the user when the service cannot be reached at all.
pub const CONNECT_FAILURE_MESSAGE: &str = "Could not connect to server";

/// Core error type for betterterp-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// REST service errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Persistence errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Errors talking to the habits/auth REST service.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The request never produced a response (unreachable host, refused
    /// connection, TLS failure).
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {detail}")]
    Status { status: u16, detail: String },

    /// The response body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),

    /// The configured base URL could not be combined with an endpoint path.
    #[error("invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// Text suitable for showing to the user.
    ///
    /// Transport failures collapse to a generic connection message; status
    /// failures show the server-supplied detail verbatim.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Transport(_) => CONNECT_FAILURE_MESSAGE.to_string(),
            ApiError::Status { detail, .. } => detail.clone(),
            ApiError::Decode(msg) => msg.clone(),
            ApiError::InvalidUrl(e) => e.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err)
        }
    }
}

/// Key-value store errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing database
    #[error("Failed to open store at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// The data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(#[from] std::io::Error),
}

impl From<rusqlite::Error> for StorageError {
    fn from(err: rusqlite::Error) -> Self {
        StorageError::QueryFailed(err.to_string())
    }
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

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// A required input was empty
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),

    /// The operation needs a signed-in user
    #[error("not signed in; run `betterterp auth login` first")]
    NotSignedIn,

    /// No habit with this id in the current listing
    #[error("no habit with id '{0}'")]
    UnknownHabit(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
