//! Maps notes onto store keys: save, load and delete.

use crate::backend::{KeyStore, StoreError};
use crate::domain::{DraftId, Note, NoteId, SavedNote, Tag};
use crate::engine::allocator::IdAllocator;
use crate::engine::error::{NoteError, NoteResult, ValidationError};
use crate::engine::keys::KeyLayout;
use crate::engine::query::{QueryResolver, QueryStrategy};
use crate::engine::swap::swap_list;
use crate::engine::tag_index::TagIndex;
use chrono::{DateTime, SubsecRound, Utc};

/// Outcome of saving a batch of notes.
#[derive(Debug, Default)]
pub struct SaveReport {
    /// Notes written, in input order.
    pub saved: Vec<SavedNote>,
    /// Blank notes that were not written.
    pub skipped: usize,
    /// Notes refused by validation, by index into the input.
    pub rejected: Vec<(usize, ValidationError)>,
}

impl SaveReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

/// Notes and their tag index in one backing store.
///
/// The store owns every `<ns>:note:<id>:*` scalar and list key; tag keys
/// are delegated to [`TagIndex`].
///
/// # Examples
///
/// ```
/// use notekeep::backend::SqliteStore;
/// use notekeep::domain::{Note, Tag};
/// use notekeep::engine::{NoteStore, QueryStrategy};
///
/// let mut store = NoteStore::open(SqliteStore::open_in_memory().unwrap(), "keep").unwrap();
/// let mut note = Note::builder()
///     .title("groceries")
///     .tag(Tag::new("home").unwrap())
///     .build();
///
/// let saved = store.save(&mut note).unwrap();
/// let found = store.resolve(&["home"], QueryStrategy::Intersection).unwrap();
/// assert_eq!(found, vec![saved.id()]);
/// ```
pub struct NoteStore<S> {
    backend: S,
    layout: KeyLayout,
    allocator: IdAllocator,
    tags: TagIndex,
    resolver: QueryResolver,
}

impl<S: KeyStore> NoteStore<S> {
    // ===========================================
    // Setup
    // ===========================================

    /// Wraps a backend, creating the id counter if it is missing.
    pub fn open(mut backend: S, namespace: &str) -> NoteResult<Self> {
        let layout = KeyLayout::new(namespace);
        let allocator = IdAllocator::new(layout.counter());
        allocator.ensure_counter(&mut backend)?;
        Ok(Self {
            backend,
            tags: TagIndex::new(layout.clone()),
            resolver: QueryResolver::new(layout.clone()),
            allocator,
            layout,
        })
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    // ===========================================
    // Save
    // ===========================================

    /// Writes a note, allocating an id if it has none.
    ///
    /// The id and timestamps are recorded on `note` before the first
    /// write, so retrying a failed save reuses the same id. `created` is
    /// taken from the store when the note already exists there, then from
    /// the note, then from the clock; `updated` is the current time, never
    /// earlier than `created`.
    ///
    /// # Errors
    ///
    /// - `ValidationError::CorruptId` if the id is not a valid integer; nothing is written
    /// - `NoteError::StoreUnavailable` if any store command fails
    pub fn save(&mut self, note: &mut Note) -> NoteResult<SavedNote> {
        let (id, fresh) = match note.id() {
            DraftId::Corrupt(raw) => {
                return Err(ValidationError::CorruptId(raw.clone()).into());
            }
            DraftId::Assigned(id) => (*id, false),
            DraftId::Unassigned => (self.allocator.allocate(&mut self.backend)?, true),
        };

        let now = Utc::now().trunc_subsecs(0);
        let stored_created = if fresh {
            None
        } else {
            self.read_timestamp(&self.layout.created(id))?
        };
        let created = stored_created.or(note.created()).unwrap_or(now);
        let updated = now.max(created);
        note.stamp(id, created, updated);

        let b = &mut self.backend;
        b.set(&self.layout.title(id), note.title())?;
        b.set(&self.layout.created(id), &created.timestamp().to_string())?;
        b.set(&self.layout.updated(id), &updated.timestamp().to_string())?;
        b.set(&self.layout.body(id), note.body())?;

        self.tags.reconcile(b, id, note.tags())?;

        let open = self.layout.open(id);
        swap_list(b, &open, &self.layout.scratch(&open), note.open())?;
        let closed = self.layout.closed(id);
        swap_list(b, &closed, &self.layout.scratch(&closed), note.closed())?;

        log::info!("saved note {id} ({})", if fresh { "new" } else { "updated" });
        Ok(SavedNote::new(id, created, updated, note.clone()))
    }

    /// Saves each note in turn.
    ///
    /// Blank notes are skipped and validation failures are collected so
    /// the rest of the batch still saves. A store failure stops the batch.
    pub fn save_all(&mut self, notes: &mut [Note]) -> NoteResult<SaveReport> {
        let mut report = SaveReport::default();
        for (position, note) in notes.iter_mut().enumerate() {
            if note.is_blank() {
                log::debug!("skipping blank note at position {position}");
                report.skipped += 1;
                continue;
            }
            match self.save(note) {
                Ok(saved) => report.saved.push(saved),
                Err(NoteError::Validation(e)) => {
                    log::warn!("note at position {position} rejected: {e}");
                    report.rejected.push((position, e));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }

    // ===========================================
    // Load
    // ===========================================

    /// Returns whether a note with this id has been saved.
    pub fn contains(&mut self, id: NoteId) -> NoteResult<bool> {
        Ok(self.backend.exists(&self.layout.created(id))?)
    }

    /// Loads notes by id, in the order given.
    ///
    /// # Errors
    ///
    /// Returns `NoteError::NotFound` for the first id with no stored note.
    pub fn load(&mut self, ids: &[NoteId]) -> NoteResult<Vec<SavedNote>> {
        let mut notes = Vec::with_capacity(ids.len());
        for &id in ids {
            let note = self.read_note(id)?;
            let Some(created) = note.created() else {
                return Err(NoteError::NotFound { id });
            };
            let updated = note.updated().unwrap_or(created).max(created);
            notes.push(SavedNote::new(id, created, updated, note));
        }
        Ok(notes)
    }

    /// Loads notes by id without checking that they exist.
    ///
    /// A missing id yields a note carrying that id and nothing else.
    pub fn load_lenient(&mut self, ids: &[NoteId]) -> NoteResult<Vec<Note>> {
        ids.iter().map(|&id| self.read_note(id)).collect()
    }

    fn read_note(&mut self, id: NoteId) -> NoteResult<Note> {
        let created = self.read_timestamp(&self.layout.created(id))?;
        let updated = self.read_timestamp(&self.layout.updated(id))?;
        let b = &mut self.backend;
        let title = b.get(&self.layout.title(id))?.unwrap_or_default();
        let body = b.get(&self.layout.body(id))?.unwrap_or_default();
        let open = b.lrange_all(&self.layout.open(id))?;
        let closed = b.lrange_all(&self.layout.closed(id))?;

        let mut tags = Vec::new();
        for name in self.tags.stored_tags(b, id)? {
            match Tag::new(&name) {
                Ok(tag) => tags.push(tag),
                Err(e) => log::warn!("note {id}: skipping stored tag: {e}"),
            }
        }

        Ok(Note::builder()
            .id(id)
            .title(title)
            .created(created)
            .updated(updated)
            .tags(tags)
            .open(open)
            .closed(closed)
            .body(body)
            .build())
    }

    fn read_timestamp(&mut self, key: &str) -> NoteResult<Option<DateTime<Utc>>> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };
        let invalid = || StoreError::InvalidValue {
            key: key.to_string(),
            value: raw.clone(),
        };
        let secs: i64 = raw.trim().parse().map_err(|_| invalid())?;
        let ts = DateTime::from_timestamp(secs, 0).ok_or_else(invalid)?;
        Ok(Some(ts))
    }

    // ===========================================
    // Delete
    // ===========================================

    /// Deletes notes and their index entries; returns how many existed.
    ///
    /// Unknown ids are ignored.
    pub fn delete(&mut self, ids: &[NoteId]) -> NoteResult<usize> {
        let mut deleted = 0;
        for &id in ids {
            let existed = self.contains(id)?;
            self.tags.unlink(&mut self.backend, id)?;
            self.backend.del(&self.layout.note_keys(id))?;
            let leftovers = self.backend.keys_with_prefix(&self.layout.note_prefix(id))?;
            self.backend.del(&leftovers)?;
            if existed {
                log::info!("deleted note {id}");
                deleted += 1;
            } else {
                log::debug!("delete: no note {id}");
            }
        }
        Ok(deleted)
    }

    // ===========================================
    // Queries
    // ===========================================

    /// Returns the ids of notes matching the tag names.
    pub fn resolve<N: AsRef<str>>(
        &mut self,
        names: &[N],
        strategy: QueryStrategy,
    ) -> NoteResult<Vec<NoteId>> {
        self.resolver.resolve(&mut self.backend, names, strategy)
    }

    /// Returns every tag in use, sorted.
    pub fn list_tags(&mut self) -> NoteResult<Vec<Tag>> {
        Ok(self.tags.list_tags(&mut self.backend)?)
    }

    /// Returns every tag in use with its note count.
    pub fn tag_counts(&mut self) -> NoteResult<Vec<(Tag, usize)>> {
        Ok(self.tags.tag_counts(&mut self.backend)?)
    }
}

#[cfg(test)]
mod tests;
