//! Core error types for daylist-core.
//!
//! This module defines the error hierarchy using thiserror. Every
//! failure is local and recoverable; nothing here is fatal to the
//! process.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for daylist-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Remote task-service errors
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Client-local validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Transcript capture / AI extraction errors
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Errors from the remote task-service client.
///
/// The failure contract is a single round trip: a transport failure
/// surfaces with no status code, a non-2xx response carries the
/// server's message when it provides one, and a body that does not
/// match the typed contract is a decode error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request never reached the server or the connection failed.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Server responded with a non-2xx status.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Response body did not match the expected shape.
    #[error("Unexpected response from server: {0}")]
    Decode(String),

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of the failure, if the server responded at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
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

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Failed to prepare data directory: {0}")]
    DataDir(String),
}

/// Client-local validation errors, raised before any request is sent.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Task title is required
    #[error("Task title must not be empty")]
    EmptyTitle,

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

/// Errors from the transcript-to-task extraction path.
#[derive(Error, Debug)]
pub enum CaptureError {
    /// No API key configured and none in the environment.
    #[error("No Gemini API key configured (set gemini.api_key or GEMINI_API_KEY)")]
    MissingApiKey,

    /// Request to the model endpoint failed.
    #[error("Gemini request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Model endpoint responded with an error status.
    #[error("Gemini error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Model returned no usable text.
    #[error("Gemini returned an empty response")]
    EmptyResponse,

    /// Model output could not be parsed as a task list, even after
    /// the permissive bracket-extraction fallback.
    #[error("Could not parse task list from model response")]
    Parse,
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
