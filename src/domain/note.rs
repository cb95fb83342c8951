//! Note types: the editable draft and the finalized, persisted form.

use crate::domain::{DraftId, NoteId, Tag};
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use std::fmt;

/// A note as it flows through the editor and the codecs.
///
/// The id and timestamps are optional here: a note written in the editor
/// has neither until the store saves it. Saving fills them in place (see
/// [`NoteStore::save`](crate::engine::NoteStore::save)).
///
/// # Examples
///
/// ```
/// use notekeep::domain::{Note, Tag};
///
/// let note = Note::builder()
///     .title("groceries")
///     .tag(Tag::new("home").unwrap())
///     .open(vec!["milk".to_string()])
///     .build();
/// assert_eq!(note.title(), "groceries");
/// assert!(note.id().assigned().is_none());
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Note {
    id: DraftId,
    title: String,
    created: Option<DateTime<Utc>>,
    updated: Option<DateTime<Utc>>,
    tags: BTreeSet<Tag>,
    open: Vec<String>,
    closed: Vec<String>,
    body: String,
}

impl Note {
    /// Creates an empty note with no id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for constructing a Note.
    pub fn builder() -> NoteBuilder {
        NoteBuilder::default()
    }

    /// Returns the note's id as supplied.
    pub fn id(&self) -> &DraftId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns when the note was first saved, if it has been.
    pub fn created(&self) -> Option<DateTime<Utc>> {
        self.created
    }

    /// Returns when the note was last saved, if it has been.
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated
    }

    /// Returns the note's tags in sorted order.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns the open tasks in insertion order.
    pub fn open(&self) -> &[String] {
        &self.open
    }

    /// Returns the closed tasks in insertion order.
    pub fn closed(&self) -> &[String] {
        &self.closed
    }

    /// Returns the note's body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// True when the note carries no id and no content at all.
    ///
    /// An untouched template coming back from the editor is blank.
    pub fn is_blank(&self) -> bool {
        self.id == DraftId::Unassigned
            && self.title.trim().is_empty()
            && self.body.trim().is_empty()
            && self.tags.is_empty()
            && self.open.is_empty()
            && self.closed.is_empty()
    }

    /// Records the identity and timestamps chosen at save time.
    pub(crate) fn stamp(&mut self, id: NoteId, created: DateTime<Utc>, updated: DateTime<Utc>) {
        self.id = DraftId::Assigned(id);
        self.created = Some(created);
        self.updated = Some(updated);
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            DraftId::Assigned(id) => write!(f, "{} [{}]", self.title, id),
            DraftId::Unassigned => write!(f, "{} [new]", self.title),
            DraftId::Corrupt(raw) => write!(f, "{} [{}?]", self.title, raw),
        }
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .field("tags", &self.tags)
            .field("open", &self.open)
            .field("closed", &self.closed)
            .field("body", &self.body)
            .finish()
    }
}

/// Builder for constructing a Note.
#[derive(Default)]
pub struct NoteBuilder {
    note: Note,
}

impl NoteBuilder {
    /// Sets the id.
    pub fn id(mut self, id: impl Into<DraftId>) -> Self {
        self.note.id = id.into();
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.note.title = title.into();
        self
    }

    /// Sets the creation timestamp.
    pub fn created(mut self, created: Option<DateTime<Utc>>) -> Self {
        self.note.created = created;
        self
    }

    /// Sets the update timestamp.
    pub fn updated(mut self, updated: Option<DateTime<Utc>>) -> Self {
        self.note.updated = updated;
        self
    }

    /// Adds one tag.
    pub fn tag(mut self, tag: Tag) -> Self {
        self.note.tags.insert(tag);
        self
    }

    /// Replaces the tag set. Duplicates collapse.
    pub fn tags(mut self, tags: impl IntoIterator<Item = Tag>) -> Self {
        self.note.tags = tags.into_iter().collect();
        self
    }

    /// Sets the open tasks.
    pub fn open(mut self, open: Vec<String>) -> Self {
        self.note.open = open;
        self
    }

    /// Sets the closed tasks.
    pub fn closed(mut self, closed: Vec<String>) -> Self {
        self.note.closed = closed;
        self
    }

    /// Sets the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.note.body = body.into();
        self
    }

    /// Builds the Note.
    pub fn build(self) -> Note {
        self.note
    }
}

/// A note that has been written to, or read from, the store.
///
/// Unlike [`Note`], the id and both timestamps are always present and
/// `created <= updated`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedNote {
    id: NoteId,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    note: Note,
}

impl SavedNote {
    pub(crate) fn new(
        id: NoteId,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
        mut note: Note,
    ) -> Self {
        note.stamp(id, created, updated);
        Self {
            id,
            created,
            updated,
            note,
        }
    }

    /// Returns the note's id.
    pub fn id(&self) -> NoteId {
        self.id
    }

    /// Returns when the note was first saved.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last saved.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        self.note.title()
    }

    /// Returns the note's tags.
    pub fn tags(&self) -> &BTreeSet<Tag> {
        self.note.tags()
    }

    /// Returns the full note.
    pub fn note(&self) -> &Note {
        &self.note
    }

    /// Converts back into an editable note.
    pub fn into_note(self) -> Note {
        self.note
    }
}

impl From<SavedNote> for Note {
    fn from(saved: SavedNote) -> Self {
        saved.into_note()
    }
}

impl fmt::Display for SavedNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.note.title(), self.id)
    }
}
