//! Note id allocation from the shared counter.

use crate::backend::{KeyStore, StoreError, StoreResult};
use crate::domain::NoteId;

/// Hands out note ids by incrementing one counter key.
///
/// The increment is the store's own atomic operation, so concurrent
/// processes sharing a store never receive the same id.
#[derive(Debug, Clone)]
pub struct IdAllocator {
    counter: String,
}

impl IdAllocator {
    pub fn new(counter: impl Into<String>) -> Self {
        Self {
            counter: counter.into(),
        }
    }

    /// Creates the counter at 0 unless it already exists.
    pub fn ensure_counter<S: KeyStore + ?Sized>(&self, store: &mut S) -> StoreResult<()> {
        if store.set_nx(&self.counter, "0")? {
            log::debug!("initialized id counter at {}", self.counter);
        }
        Ok(())
    }

    /// Returns the next id.
    ///
    /// # Errors
    ///
    /// Fails if the store is unreachable or the counter holds something
    /// other than a non-negative integer.
    pub fn allocate<S: KeyStore + ?Sized>(&self, store: &mut S) -> StoreResult<NoteId> {
        let value = store.incr(&self.counter)?;
        let id = u64::try_from(value).map_err(|_| StoreError::InvalidValue {
            key: self.counter.clone(),
            value: value.to_string(),
        })?;
        log::debug!("allocated note id {id}");
        Ok(NoteId::new(id))
    }
}
