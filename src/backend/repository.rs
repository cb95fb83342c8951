//! KeyStore trait and error types.

use std::collections::BTreeSet;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by a backing store.
///
/// Every variant is fatal for the operation in progress; nothing here is
/// retried automatically.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store could not be reached, or the connection dropped.
    #[error("backing store unavailable: {0}")]
    Unavailable(String),

    /// A SQLite error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Redis rejected a command.
    #[error("redis error: {0}")]
    Redis(redis::RedisError),

    /// `rename` was asked to move a key that does not exist.
    #[error("no such key: {key}")]
    NoSuchKey { key: String },

    /// A key holds a value this crate did not write.
    #[error("unexpected value at {key}: '{value}'")]
    InvalidValue { key: String, value: String },

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The command surface a backing store must provide.
///
/// The primitives mirror Redis semantics: a key holds a string, a set or a
/// list; sets and lists that become empty cease to exist; `rename`
/// overwrites its destination. Each call is atomic on its own, and no call
/// spans a transaction across several keys.
pub trait KeyStore {
    /// Atomically increments the integer at `key` (absent counts as 0) and
    /// returns the new value.
    fn incr(&mut self, key: &str) -> StoreResult<i64>;

    /// Returns the string at `key`, if any.
    fn get(&mut self, key: &str) -> StoreResult<Option<String>>;

    /// Sets the string at `key`.
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;

    /// Sets the string at `key` only if the key is absent. Returns whether
    /// the value was written.
    fn set_nx(&mut self, key: &str, value: &str) -> StoreResult<bool>;

    /// Adds members to the set at `key`; returns how many were new.
    fn sadd(&mut self, key: &str, members: &[String]) -> StoreResult<usize>;

    /// Removes members from the set at `key`; returns how many were present.
    fn srem(&mut self, key: &str, members: &[String]) -> StoreResult<usize>;

    /// Returns the members of the set at `key`.
    fn smembers(&mut self, key: &str) -> StoreResult<BTreeSet<String>>;

    /// Returns the number of members in the set at `key`.
    fn scard(&mut self, key: &str) -> StoreResult<usize>;

    /// Returns the members of the first set that are in none of the others.
    fn sdiff(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>>;

    /// Returns the members present in every listed set.
    fn sinter(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>>;

    /// Stores `sdiff(keys)` at `dest`, replacing it; returns its size.
    fn sdiffstore(&mut self, dest: &str, keys: &[String]) -> StoreResult<usize>;

    /// Appends items to the list at `key`; returns the new length.
    fn rpush(&mut self, key: &str, items: &[String]) -> StoreResult<usize>;

    /// Returns the whole list at `key` in order.
    fn lrange_all(&mut self, key: &str) -> StoreResult<Vec<String>>;

    /// Deletes keys; returns how many existed.
    fn del(&mut self, keys: &[String]) -> StoreResult<usize>;

    /// Moves `from` to `to`, overwriting `to`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NoSuchKey` if `from` does not exist.
    fn rename(&mut self, from: &str, to: &str) -> StoreResult<()>;

    /// Returns whether `key` holds any value.
    fn exists(&mut self, key: &str) -> StoreResult<bool>;

    /// Returns every key starting with `prefix`, sorted.
    fn keys_with_prefix(&mut self, prefix: &str) -> StoreResult<Vec<String>>;
}

impl<S: KeyStore + ?Sized> KeyStore for Box<S> {
    fn incr(&mut self, key: &str) -> StoreResult<i64> {
        (**self).incr(key)
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn set_nx(&mut self, key: &str, value: &str) -> StoreResult<bool> {
        (**self).set_nx(key, value)
    }

    fn sadd(&mut self, key: &str, members: &[String]) -> StoreResult<usize> {
        (**self).sadd(key, members)
    }

    fn srem(&mut self, key: &str, members: &[String]) -> StoreResult<usize> {
        (**self).srem(key, members)
    }

    fn smembers(&mut self, key: &str) -> StoreResult<BTreeSet<String>> {
        (**self).smembers(key)
    }

    fn scard(&mut self, key: &str) -> StoreResult<usize> {
        (**self).scard(key)
    }

    fn sdiff(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        (**self).sdiff(keys)
    }

    fn sinter(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        (**self).sinter(keys)
    }

    fn sdiffstore(&mut self, dest: &str, keys: &[String]) -> StoreResult<usize> {
        (**self).sdiffstore(dest, keys)
    }

    fn rpush(&mut self, key: &str, items: &[String]) -> StoreResult<usize> {
        (**self).rpush(key, items)
    }

    fn lrange_all(&mut self, key: &str) -> StoreResult<Vec<String>> {
        (**self).lrange_all(key)
    }

    fn del(&mut self, keys: &[String]) -> StoreResult<usize> {
        (**self).del(keys)
    }

    fn rename(&mut self, from: &str, to: &str) -> StoreResult<()> {
        (**self).rename(from, to)
    }

    fn exists(&mut self, key: &str) -> StoreResult<bool> {
        (**self).exists(key)
    }

    fn keys_with_prefix(&mut self, prefix: &str) -> StoreResult<Vec<String>> {
        (**self).keys_with_prefix(prefix)
    }
}
