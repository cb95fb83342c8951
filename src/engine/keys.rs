//! Key layout of notes and the tag index inside the backing store.

use crate::domain::NoteId;

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "keep";

/// Builds every key the engine reads or writes.
///
/// ```text
/// <ns>:id-counter                      string
/// <ns>:note:<id>:title|created|updated|body   strings
/// <ns>:note:<id>:tags                  set
/// <ns>:note:<id>:open|closed           lists
/// <ns>:tags:<tag>                      set of note ids
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyLayout {
    namespace: String,
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

impl KeyLayout {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn counter(&self) -> String {
        format!("{}:id-counter", self.namespace)
    }

    /// Prefix shared by every key of one note, trailing colon included.
    pub fn note_prefix(&self, id: NoteId) -> String {
        format!("{}:note:{}:", self.namespace, id)
    }

    fn note_field(&self, id: NoteId, field: &str) -> String {
        format!("{}{}", self.note_prefix(id), field)
    }

    pub fn title(&self, id: NoteId) -> String {
        self.note_field(id, "title")
    }

    pub fn created(&self, id: NoteId) -> String {
        self.note_field(id, "created")
    }

    pub fn updated(&self, id: NoteId) -> String {
        self.note_field(id, "updated")
    }

    pub fn body(&self, id: NoteId) -> String {
        self.note_field(id, "body")
    }

    pub fn tags(&self, id: NoteId) -> String {
        self.note_field(id, "tags")
    }

    pub fn open(&self, id: NoteId) -> String {
        self.note_field(id, "open")
    }

    pub fn closed(&self, id: NoteId) -> String {
        self.note_field(id, "closed")
    }

    /// Scratch key paired with `key` for the swap protocol.
    pub fn scratch(&self, key: &str) -> String {
        format!("{key}:scratch")
    }

    /// Per-note scratch sets holding one tag diff.
    pub fn tags_removed(&self, id: NoteId) -> String {
        self.note_field(id, "tags:removed")
    }

    pub fn tags_added(&self, id: NoteId) -> String {
        self.note_field(id, "tags:added")
    }

    /// Every fixed key of one note, scratch keys included.
    pub fn note_keys(&self, id: NoteId) -> Vec<String> {
        let tags = self.tags(id);
        let open = self.open(id);
        let closed = self.closed(id);
        vec![
            self.title(id),
            self.created(id),
            self.updated(id),
            self.body(id),
            self.scratch(&tags),
            self.scratch(&open),
            self.scratch(&closed),
            self.tags_removed(id),
            self.tags_added(id),
            tags,
            open,
            closed,
        ]
    }

    /// Inverted-index set for a tag name.
    ///
    /// Takes the raw name so that sets for names read back from the store
    /// can be addressed even if they no longer parse as a [`Tag`](crate::domain::Tag).
    pub fn tag_set(&self, tag: &str) -> String {
        format!("{}{}", self.tag_prefix(), tag)
    }

    pub fn tag_prefix(&self) -> String {
        format!("{}:tags:", self.namespace)
    }

    /// Recovers the tag name from an inverted-index key.
    ///
    /// Strips the exact prefix; returns `None` for keys outside the index.
    pub fn tag_from_key<'a>(&self, key: &'a str) -> Option<&'a str> {
        let rest = key.strip_prefix(&self.tag_prefix())?;
        (!rest.is_empty()).then_some(rest)
    }
}
