//! Error type shared by every engine operation.

use thiserror::Error;

/// Errors produced by the pixel-transform engine.
///
/// All variants are recoverable by the caller: the engine never retries, and
/// the same input always yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The buffer has zero width or zero height.
    #[error("Empty input: image has no pixels")]
    EmptyInput,

    /// A parameter is outside its documented range.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// Declared dimensions disagree with the sample data.
    #[error("Dimension mismatch: expected {expected} samples, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The background worker pool could not be created.
    #[error("Filter worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl EngineError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, EngineError>;
