//! Custom error types for nestbook
//!
//! This module defines the error hierarchy for the persistence layer using
//! thiserror for ergonomic error definitions. Only the store adapters and the
//! CLI ever see these; the persistence service converts them into safe
//! defaults before anything reaches a caller.

use thiserror::Error;

/// The main error type for nestbook operations
#[derive(Error, Debug)]
pub enum NestError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Durable store errors (open, upgrade, transaction)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Durable storage is not available in this environment
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl NestError {
    /// Check if this error came from an unavailable environment
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_))
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for NestError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for NestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for NestError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for nestbook operations
pub type NestResult<T> = Result<T, NestError>;
