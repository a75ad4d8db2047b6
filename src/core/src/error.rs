//! Unified error types for the Fortress data model
//!
//! Errors raised while building or decoding the shared types. The RBAC crate
//! wraps these in its own error enum.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for the Fortress data model
#[derive(Debug, Error)]
pub enum CoreError {
    /// Raw directory-encoded value could not be decoded
    #[error("Invalid raw value: {0}")]
    InvalidRaw(String),

    /// Malformed constraint data (bad cardinality, empty set, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/Deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl CoreError {
    /// Create a raw decoding error
    pub fn invalid_raw<S: Into<String>>(msg: S) -> Self {
        CoreError::InvalidRaw(msg.into())
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        CoreError::Configuration(msg.into())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Serialization(err.to_string())
    }
}
