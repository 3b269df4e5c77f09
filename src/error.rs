//! Error types shared across the crate.

use thiserror::Error;

/// Faults raised by malformed inputs to the core.
///
/// Infeasible searches are not errors: they produce an empty
/// [`OptimalSubset`](crate::search::OptimalSubset) instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KnapsackError {
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    #[error("duplicate item id: {id}")]
    DuplicateItemId { id: String },

    #[error("unknown item id: {id}")]
    UnknownItemId { id: String },

    #[error("too many items for exhaustive search: {count} (limit {limit})")]
    TooManyItems { count: usize, limit: usize },

    #[error("threshold must be finite, got {value}")]
    InvalidThreshold { value: f64 },

    #[error("session already finished")]
    SessionFinished,
}

/// Failure reported by a [`RecordSink`](crate::round::RecordSink).
#[derive(Error, Debug)]
pub enum HandoffError {
    #[error("record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("record transport failed: {message}")]
    Transport { message: String },
}

pub type Result<T> = std::result::Result<T, KnapsackError>;
