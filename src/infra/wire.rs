//! JSON wire format used by `keep import` and API clients.
//!
//! A payload is a JSON array of note objects with fields `id`, `title`,
//! `createdAt`, `updatedAt`, `tags`, `openTasks`, `closedTasks` and `body`.
//! Unassigned ids and timestamps are `null`.

use crate::domain::{DraftId, Note, Tag};
use crate::infra::document::FormatError;
use crate::infra::fields::{draft_id, null_as_default, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct WireNote {
    #[serde(
        default,
        deserialize_with = "draft_id::deserialize",
        serialize_with = "draft_id::serialize_null"
    )]
    id: DraftId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(
        rename = "createdAt",
        default,
        deserialize_with = "timestamp::deserialize",
        serialize_with = "timestamp::serialize_null"
    )]
    created: Option<DateTime<Utc>>,
    #[serde(
        rename = "updatedAt",
        default,
        deserialize_with = "timestamp::deserialize",
        serialize_with = "timestamp::serialize_null"
    )]
    updated: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<Tag>,
    #[serde(rename = "openTasks", default, deserialize_with = "null_as_default")]
    open: Vec<String>,
    #[serde(rename = "closedTasks", default, deserialize_with = "null_as_default")]
    closed: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    body: String,
}

impl From<&Note> for WireNote {
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

impl From<WireNote> for Note {
    fn from(wire: WireNote) -> Self {
        Note::builder()
            .id(wire.id)
            .title(wire.title)
            .created(wire.created)
            .updated(wire.updated)
            .tags(wire.tags)
            .open(wire.open)
            .closed(wire.closed)
            .body(wire.body)
            .build()
    }
}

/// Serializes notes as a pretty-printed JSON array.
pub fn encode_wire(notes: &[Note]) -> Result<Vec<u8>, FormatError> {
    let wire: Vec<WireNote> = notes.iter().map(WireNote::from).collect();
    Ok(serde_json::to_vec_pretty(&wire)?)
}

/// Parses a JSON array of notes.
///
/// # Errors
///
/// Returns `FormatError::Wire` if the payload is not an array of note
/// objects, or carries unknown fields.
pub fn decode_wire(bytes: &[u8]) -> Result<Vec<Note>, FormatError> {
    let wire: Vec<WireNote> = serde_json::from_slice(bytes)?;
    Ok(wire.into_iter().map(Note::from).collect())
}
