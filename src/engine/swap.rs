//! Whole-value replacement of a set or list key.
//!
//! The new value is built under a scratch key, then the live key is deleted
//! and the scratch key renamed over it. Readers see either the old value,
//! nothing (between delete and rename), or the new value; never a mix.

use crate::backend::{KeyStore, StoreResult};

/// Replaces the list at `key` with `items`, keeping their order.
pub fn swap_list<S: KeyStore + ?Sized>(
    store: &mut S,
    key: &str,
    scratch: &str,
    items: &[String],
) -> StoreResult<()> {
    store.del(&[scratch.to_string()])?;
    store.rpush(scratch, items)?;
    install(store, key, scratch, !items.is_empty())
}

/// Replaces the set at `key` with `members`.
pub fn swap_set<S: KeyStore + ?Sized>(
    store: &mut S,
    key: &str,
    scratch: &str,
    members: &[String],
) -> StoreResult<()> {
    store.del(&[scratch.to_string()])?;
    store.sadd(scratch, members)?;
    install(store, key, scratch, !members.is_empty())
}

/// Moves a prepared scratch key over `key`.
///
/// An empty value never exists as a key, so there is nothing to rename.
pub(crate) fn install<S: KeyStore + ?Sized>(
    store: &mut S,
    key: &str,
    scratch: &str,
    populated: bool,
) -> StoreResult<()> {
    store.del(&[key.to_string()])?;
    if populated {
        store.rename(scratch, key)?;
    }
    Ok(())
}
