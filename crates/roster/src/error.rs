//! Error types for the adapter layer.

use thiserror::Error;

/// Errors that can occur during adapter operations.
///
/// Duplicate insertions are deliberately *not* represented here: rejecting a
/// duplicate payload is an ordinary `false` return, observable only through
/// the return value of the operation.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// A precondition on an argument was violated before any state changed.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    /// An index-addressed operation was given an index outside the valid range.
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    /// A value-addressed operation referenced a payload that is not part of
    /// the backing sequence. Distinct from [`AdapterError::OutOfBounds`] so
    /// callers can tell "wrong index" from "wrong item".
    #[error("item not found in the backing sequence")]
    NotFound,

    /// Serializing or deserializing adapter state failed.
    #[error("state serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AdapterError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }
}

/// Result type for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AdapterError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(err.to_string(), "index 7 out of bounds for length 3");

        let err = AdapterError::invalid_argument("the number of states must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid argument: the number of states must be at least 1"
        );
    }
}
