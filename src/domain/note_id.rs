//! Integer note identifier and the raw id form carried by unsaved notes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A unique identifier for a note.
///
/// Ids are issued by the store's shared counter, so they are positive and
/// increase monotonically in allocation order.
///
/// # Examples
///
/// ```
/// use notekeep::domain::NoteId;
///
/// let id: NoteId = "42".parse().unwrap();
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(u64);

impl NoteId {
    /// Wraps a raw counter value.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NoteId({})", self.0)
    }
}

/// Error returned when parsing an invalid note id.
#[derive(Debug, Clone)]
pub struct ParseNoteIdError {
    value: String,
}

impl ParseNoteIdError {
    /// Returns the invalid value that caused this error.
    pub fn invalid_value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseNoteIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid note id '{}': expected a positive integer", self.value)
    }
}

impl std::error::Error for ParseNoteIdError {}

impl FromStr for NoteId {
    type Err = ParseNoteIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        // u64::from_str accepts a leading '+', which is not an id form
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseNoteIdError {
                value: s.to_string(),
            });
        }
        trimmed.parse().map(NoteId).map_err(|_| ParseNoteIdError {
            value: s.to_string(),
        })
    }
}

/// The id of a note as supplied by a caller, before the store checks it.
///
/// Documents and wire payloads may carry an empty id (a new note), a valid
/// integer id, or arbitrary text. The codecs preserve that text so that
/// saving can reject it as a corrupt id instead of failing the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DraftId {
    /// No id yet; one is allocated on save.
    #[default]
    Unassigned,
    /// A well-formed id.
    Assigned(NoteId),
    /// Text that is not a valid id.
    Corrupt(String),
}

impl DraftId {
    /// Classifies raw id text. Surrounding whitespace is ignored.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Unassigned;
        }
        match trimmed.parse() {
            Ok(id) => Self::Assigned(id),
            Err(_) => Self::Corrupt(trimmed.to_string()),
        }
    }

    /// Classifies an integer id; negative values are corrupt.
    pub fn from_integer(value: i64) -> Self {
        match u64::try_from(value) {
            Ok(id) => Self::Assigned(NoteId(id)),
            Err(_) => Self::Corrupt(value.to_string()),
        }
    }

    /// Returns the id if it is well-formed.
    pub fn assigned(&self) -> Option<NoteId> {
        match self {
            Self::Assigned(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<NoteId> for DraftId {
    fn from(id: NoteId) -> Self {
        Self::Assigned(id)
    }
}
