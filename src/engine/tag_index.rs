//! Inverted tag index: tag name to the set of note ids carrying it.

use crate::backend::{KeyStore, StoreResult};
use crate::domain::{NoteId, Tag};
use crate::engine::keys::KeyLayout;
use crate::engine::swap::install;
use std::collections::BTreeSet;

/// Tags that one reconcile moved a note into or out of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl TagDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Keeps `<ns>:tags:<tag>` sets consistent with each note's own tag set.
///
/// The index is derived data. For every saved note, its id is in the set of
/// each of its tags and in no other tag set. A save interrupted part way
/// leaves at most that one note's entries stale until it is saved again.
#[derive(Debug, Clone)]
pub struct TagIndex {
    layout: KeyLayout,
}

impl TagIndex {
    pub fn new(layout: KeyLayout) -> Self {
        Self { layout }
    }

    /// Brings the index in line with `desired` for note `id`.
    ///
    /// The desired set is staged under a scratch key and diffed against
    /// the stored tag set inside the store. Index sets are then updated for
    /// the changed tags only, and the scratch set is renamed over the
    /// note's tag set.
    pub fn reconcile<S: KeyStore + ?Sized>(
        &self,
        store: &mut S,
        id: NoteId,
        desired: &BTreeSet<Tag>,
    ) -> StoreResult<TagDiff> {
        let tags_key = self.layout.tags(id);
        let scratch = self.layout.scratch(&tags_key);
        let removed_key = self.layout.tags_removed(id);
        let added_key = self.layout.tags_added(id);
        let desired: Vec<String> = desired.iter().map(|t| t.as_str().to_string()).collect();

        store.del(&[scratch.clone()])?;
        store.sadd(&scratch, &desired)?;

        store.sdiffstore(&removed_key, &[tags_key.clone(), scratch.clone()])?;
        store.sdiffstore(&added_key, &[scratch.clone(), tags_key.clone()])?;
        let removed: Vec<String> = store.smembers(&removed_key)?.into_iter().collect();
        let added: Vec<String> = store.smembers(&added_key)?.into_iter().collect();

        let member = [id.to_string()];
        for tag in &removed {
            store.srem(&self.layout.tag_set(tag), &member)?;
        }
        for tag in &added {
            store.sadd(&self.layout.tag_set(tag), &member)?;
        }

        install(store, &tags_key, &scratch, !desired.is_empty())?;
        store.del(&[removed_key, added_key])?;

        let diff = TagDiff { added, removed };
        if !diff.is_empty() {
            log::debug!(
                "note {id}: tags added {:?}, removed {:?}",
                diff.added,
                diff.removed
            );
        }
        Ok(diff)
    }

    /// Returns the tag names stored for a note.
    pub fn stored_tags<S: KeyStore + ?Sized>(
        &self,
        store: &mut S,
        id: NoteId,
    ) -> StoreResult<BTreeSet<String>> {
        store.smembers(&self.layout.tags(id))
    }

    /// Removes a note from every tag set it belongs to and drops its own
    /// tag set.
    pub fn unlink<S: KeyStore + ?Sized>(&self, store: &mut S, id: NoteId) -> StoreResult<()> {
        let member = [id.to_string()];
        for tag in self.stored_tags(store, id)? {
            store.srem(&self.layout.tag_set(&tag), &member)?;
        }
        store.del(&[self.layout.tags(id)])?;
        Ok(())
    }

    /// Returns the raw members of one tag set.
    pub fn members<S: KeyStore + ?Sized>(
        &self,
        store: &mut S,
        tag: &Tag,
    ) -> StoreResult<BTreeSet<String>> {
        store.smembers(&self.layout.tag_set(tag.as_str()))
    }

    /// Returns every tag that at least one note carries, sorted.
    ///
    /// Index keys whose name no longer forms a valid tag are skipped with
    /// a warning.
    pub fn list_tags<S: KeyStore + ?Sized>(&self, store: &mut S) -> StoreResult<Vec<Tag>> {
        let keys = store.keys_with_prefix(&self.layout.tag_prefix())?;
        let mut tags = Vec::with_capacity(keys.len());
        for key in &keys {
            let Some(name) = self.layout.tag_from_key(key) else {
                continue;
            };
            match Tag::new(name) {
                Ok(tag) => tags.push(tag),
                Err(e) => log::warn!("skipping index key {key}: {e}"),
            }
        }
        tags.sort();
        tags.dedup();
        Ok(tags)
    }

    /// Returns every tag with the number of notes carrying it.
    pub fn tag_counts<S: KeyStore + ?Sized>(
        &self,
        store: &mut S,
    ) -> StoreResult<Vec<(Tag, usize)>> {
        let tags = self.list_tags(store)?;
        let mut counts = Vec::with_capacity(tags.len());
        for tag in tags {
            let count = store.scard(&self.layout.tag_set(tag.as_str()))?;
            counts.push((tag, count));
        }
        Ok(counts)
    }
}
