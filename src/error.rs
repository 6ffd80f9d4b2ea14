//! Error types for accuracy evaluation

use thiserror::Error;

/// Result type alias for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Error types that can occur while evaluating an index
#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Index has no leaves or no decision layers")]
    EmptyIndex,

    #[error("Query failed: {0}")]
    QueryFailure(String),

    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("Exact query returned {actual} neighbours, expected {expected}")]
    IncompleteGroundTruth { expected: usize, actual: usize },

    #[error("Layered query reached depth {depth}, allowed range is 1..={max_depth}")]
    InvalidTrace { depth: usize, max_depth: usize },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for EvalError {
    fn from(err: serde_json::Error) -> Self {
        EvalError::SerializationError(err.to_string())
    }
}
