//! Error types for image sequences and transfer tracking.

use thiserror::Error;

/// Result type alias for sequence operations.
pub type SequenceResult<T> = Result<T, SequenceError>;

/// Errors that can occur while querying sequences or tracking transfers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// Image handle is not a current member of the queried sequence.
    #[error("Image not found in sequence: {0}")]
    NotFound(String),

    /// A counter or flag was asked to move into an impossible state.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl SequenceError {
    /// Creates a NotFound error.
    pub fn not_found(image: impl Into<String>) -> Self {
        Self::NotFound(image.into())
    }

    /// Creates an InvalidState error.
    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    /// Returns true for the NotFound kind.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
