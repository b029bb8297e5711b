//! Error types for the Pourbaix pipeline.

use thiserror::Error;

/// Unified error type for diagram construction.
#[derive(Error, Debug)]
pub enum PourbaixError {
    /// Input outside its declared domain (detected before evaluation)
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A potential field produced a non-finite value
    #[error("Numeric degenerate: {0}")]
    NumericDegenerate(String),

    /// Malformed JSON for a config or constants table
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PourbaixError {
    /// Creates an invalid-parameter error.
    pub fn invalid(message: impl Into<String>) -> Self {
        PourbaixError::InvalidParameter(message.into())
    }

    /// Creates a numeric-degenerate error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        PourbaixError::NumericDegenerate(message.into())
    }
}

impl From<ndarray::ShapeError> for PourbaixError {
    fn from(err: ndarray::ShapeError) -> Self {
        PourbaixError::InvalidParameter(format!("field shapes disagree: {}", err))
    }
}

/// Result alias for diagram operations.
pub type Result<T> = std::result::Result<T, PourbaixError>;
