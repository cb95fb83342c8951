//! Editable YAML document: a sequence of notes.
//!
//! # Format
//! ```text
//! - id: 1
//!   title: groceries
//!   created: 1700000000
//!   updated: 1700000300
//!   tags:
//!   - errand
//!   - home
//!   open:
//!   - milk
//!   closed: []
//!   body: ''
//! ```
//!
//! New notes carry `id: ''` and blank timestamps, filled in on save.

use crate::domain::{DraftId, Note, Tag};
use crate::infra::fields::{draft_id, null_as_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A document or payload could not be encoded or decoded.
#[derive(Debug, Error)]
pub enum FormatError {
    #[error("invalid document: {0}")]
    Document(#[from] serde_yaml::Error),

    #[error("invalid wire payload: {0}")]
    Wire(#[from] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct DocumentNote {
    #[serde(
        default,
        deserialize_with = "draft_id::deserialize",
        serialize_with = "draft_id::serialize_blank"
    )]
    id: DraftId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        serialize_with = "timestamp::serialize_blank"
    )]
    created: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize",
        serialize_with = "timestamp::serialize_blank"
    )]
    updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<Tag>,
    #[serde(default, deserialize_with = "null_as_default")]
    open: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    closed: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    body: String,
}

impl From<&Note> for DocumentNote {
    fn from(note: &Note) -> Self {
        Self {
            id: note.id().clone(),
            title: note.title().to_string(),
            created: note.created(),
            updated: note.updated(),
            tags: note.tags().iter().cloned().collect(),
            open: note.open().to_vec(),
            closed: note.closed().to_vec(),
            body: note.body().to_string(),
        }
    }
}

impl From<DocumentNote> for Note {
    fn from(doc: DocumentNote) -> Self {
        Note::builder()
            .id(doc.id)
            .title(doc.title)
            .created(doc.created)
            .updated(doc.updated)
            .tags(doc.tags)
            .open(doc.open)
            .closed(doc.closed)
            .body(doc.body)
            .build()
    }
}

/// Renders notes as an editable YAML document.
pub fn encode_document(notes: &[Note]) -> Result<String, FormatError> {
    let docs: Vec<DocumentNote> = notes.iter().map(DocumentNote::from).collect();
    Ok(serde_yaml::to_string(&docs)?)
}

/// Parses an edited document.
///
/// A blank document holds zero notes.
///
/// # Errors
///
/// Returns `FormatError::Document` for invalid YAML, unknown fields,
/// malformed timestamps or invalid tags.
pub fn decode_document(text: &str) -> Result<Vec<Note>, FormatError> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let docs: Vec<DocumentNote> = serde_yaml::from_str(text)?;
    Ok(docs.into_iter().map(Note::from).collect())
}
