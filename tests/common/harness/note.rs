//! Builder for test notes with sensible defaults.

use notekeep::domain::{Note, Tag};

/// Builder for creating test notes.
#[derive(Debug, Default)]
pub struct TestNote {
    title: String,
    tags: Vec<Tag>,
    open: Vec<String>,
    closed: Vec<String>,
    body: String,
}

impl TestNote {
    /// Creates a new test note with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.push(Tag::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Adds an open task.
    pub fn open(mut self, task: impl Into<String>) -> Self {
        self.open.push(task.into());
        self
    }

    /// Adds a closed task.
    pub fn closed(mut self, task: impl Into<String>) -> Self {
        self.closed.push(task.into());
        self
    }

    /// Sets the body content.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Converts to an unsaved domain note.
    pub fn to_note(&self) -> Note {
        Note::builder()
            .title(self.title.clone())
            .tags(self.tags.clone())
            .open(self.open.clone())
            .closed(self.closed.clone())
            .body(self.body.clone())
            .build()
    }
}
