//! Core types: Note, SavedNote, Tag, NoteId

mod note;
mod note_id;
mod tag;

pub use note::{Note, NoteBuilder, SavedNote};
pub use note_id::{DraftId, NoteId, ParseNoteIdError};
pub use tag::{ParseTagError, Tag};
