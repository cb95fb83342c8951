//! Backing stores: the key/set/list command surface the engine writes to.
//!
//! Two implementations share the [`KeyStore`] trait: a local SQLite file
//! (the default) and a Redis server.

mod redis_store;
mod repository;
pub mod schema;
mod sqlite;

pub use redis_store::RedisStore;
pub use repository::{KeyStore, StoreError, StoreResult};
pub use sqlite::{SqliteStore, Transaction};

use std::path::Path;

const REDIS_SCHEMES: [&str; 3] = ["redis://", "rediss://", "redis+unix://"];

/// Returns true if `location` names a Redis server rather than a file.
pub fn is_redis_url(location: &str) -> bool {
    REDIS_SCHEMES
        .iter()
        .any(|scheme| location.starts_with(scheme))
}

/// Opens the store named by `location`.
///
/// A `redis://`, `rediss://` or `redis+unix://` URL connects to Redis.
/// Anything else is a SQLite file path, optionally written as
/// `sqlite://<path>`.
pub fn open_backend(location: &str) -> StoreResult<Box<dyn KeyStore>> {
    if is_redis_url(location) {
        log::debug!("opening redis store at {location}");
        return Ok(Box::new(RedisStore::open(location)?));
    }
    let path = location.strip_prefix("sqlite://").unwrap_or(location);
    log::debug!("opening sqlite store at {path}");
    Ok(Box::new(SqliteStore::open(Path::new(path))?))
}
