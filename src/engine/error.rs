//! Engine error types.

use crate::backend::StoreError;
use crate::domain::NoteId;
use thiserror::Error;

/// A note or query was rejected before anything was written.
///
/// Never retried: the input has to change.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The note's id is neither empty nor a valid integer.
    #[error("corrupt id '{0}'")]
    CorruptId(String),

    /// A tag name in a query does not form a valid tag.
    #[error("invalid tag '{name}': {reason}")]
    InvalidTag { name: String, reason: String },
}

/// Errors raised by the note store.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Strict load of an id with no stored note.
    #[error("note {id} not found")]
    NotFound { id: NoteId },

    /// The backing store failed; the operation was abandoned.
    #[error(transparent)]
    StoreUnavailable(#[from] StoreError),
}

/// Result type for note store operations.
pub type NoteResult<T> = Result<T, NoteError>;
