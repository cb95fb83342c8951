//! Redis-backed key store.

use crate::backend::{KeyStore, StoreError, StoreResult};
use redis::{Client, Connection, RedisError};
use std::collections::BTreeSet;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Keys fetched per SCAN round trip.
const SCAN_BATCH: usize = 500;

/// Key store backed by a Redis server.
///
/// Each primitive is exactly one Redis command, so per-key atomicity is
/// whatever Redis gives that command.
pub struct RedisStore {
    conn: Connection,
}

impl RedisStore {
    /// Connects to the server at `url`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Unavailable` if the URL is malformed or the
    /// server cannot be reached.
    pub fn open(url: &str) -> StoreResult<Self> {
        let client = Client::open(url)
            .map_err(|e| StoreError::Unavailable(format!("{url}: {e}")))?;
        let conn = client
            .get_connection_with_timeout(CONNECT_TIMEOUT)
            .map_err(|e| StoreError::Unavailable(format!("{url}: {e}")))?;
        Ok(Self { conn })
    }
}

impl From<RedisError> for StoreError {
    fn from(err: RedisError) -> Self {
        if err.is_io_error()
            || err.is_connection_refusal()
            || err.is_connection_dropped()
            || err.is_timeout()
        {
            StoreError::Unavailable(err.to_string())
        } else {
            StoreError::Redis(err)
        }
    }
}

/// Escapes glob metacharacters so a prefix matches literally in SCAN.
fn glob_escape(prefix: &str) -> String {
    let mut escaped = String::with_capacity(prefix.len() + 1);
    for c in prefix.chars() {
        if matches!(c, '*' | '?' | '[' | ']' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('*');
    escaped
}

fn multi(name: &str, head: &str, rest: &[String]) -> redis::Cmd {
    let mut cmd = redis::cmd(name);
    cmd.arg(head);
    for item in rest {
        cmd.arg(item);
    }
    cmd
}

fn keyed(name: &str, keys: &[String]) -> redis::Cmd {
    let mut cmd = redis::cmd(name);
    for key in keys {
        cmd.arg(key);
    }
    cmd
}

impl KeyStore for RedisStore {
    fn incr(&mut self, key: &str) -> StoreResult<i64> {
        Ok(redis::cmd("INCR").arg(key).query(&mut self.conn)?)
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        Ok(redis::cmd("GET").arg(key).query(&mut self.conn)?)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        Ok(redis::cmd("SET").arg(key).arg(value).query(&mut self.conn)?)
    }

    fn set_nx(&mut self, key: &str, value: &str) -> StoreResult<bool> {
        Ok(redis::cmd("SETNX")
            .arg(key)
            .arg(value)
            .query(&mut self.conn)?)
    }

    fn sadd(&mut self, key: &str, members: &[String]) -> StoreResult<usize> {
        if members.is_empty() {
            return Ok(0);
        }
        Ok(multi("SADD", key, members).query(&mut self.conn)?)
    }

    fn srem(&mut self, key: &str, members: &[String]) -> StoreResult<usize> {
        if members.is_empty() {
            return Ok(0);
        }
        Ok(multi("SREM", key, members).query(&mut self.conn)?)
    }

    fn smembers(&mut self, key: &str) -> StoreResult<BTreeSet<String>> {
        Ok(redis::cmd("SMEMBERS").arg(key).query(&mut self.conn)?)
    }

    fn scard(&mut self, key: &str) -> StoreResult<usize> {
        Ok(redis::cmd("SCARD").arg(key).query(&mut self.conn)?)
    }

    fn sdiff(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        if keys.is_empty() {
            return Ok(BTreeSet::new());
        }
        Ok(keyed("SDIFF", keys).query(&mut self.conn)?)
    }

    fn sinter(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        if keys.is_empty() {
            return Ok(BTreeSet::new());
        }
        Ok(keyed("SINTER", keys).query(&mut self.conn)?)
    }

    fn sdiffstore(&mut self, dest: &str, keys: &[String]) -> StoreResult<usize> {
        if keys.is_empty() {
            self.del(&[dest.to_string()])?;
            return Ok(0);
        }
        Ok(multi("SDIFFSTORE", dest, keys).query(&mut self.conn)?)
    }

    fn rpush(&mut self, key: &str, items: &[String]) -> StoreResult<usize> {
        if items.is_empty() {
            return Ok(redis::cmd("LLEN").arg(key).query(&mut self.conn)?);
        }
        Ok(multi("RPUSH", key, items).query(&mut self.conn)?)
    }

    fn lrange_all(&mut self, key: &str) -> StoreResult<Vec<String>> {
        Ok(redis::cmd("LRANGE")
            .arg(key)
            .arg(0)
            .arg(-1)
            .query(&mut self.conn)?)
    }

    fn del(&mut self, keys: &[String]) -> StoreResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        Ok(keyed("DEL", keys).query(&mut self.conn)?)
    }

    fn rename(&mut self, from: &str, to: &str) -> StoreResult<()> {
        let result: Result<(), RedisError> = redis::cmd("RENAME")
            .arg(from)
            .arg(to)
            .query(&mut self.conn);
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.to_string().to_lowercase().contains("no such key") => {
                Err(StoreError::NoSuchKey {
                    key: from.to_string(),
                })
            }
            Err(err) => Err(err.into()),
        }
    }

    fn exists(&mut self, key: &str) -> StoreResult<bool> {
        Ok(redis::cmd("EXISTS").arg(key).query(&mut self.conn)?)
    }

    fn keys_with_prefix(&mut self, prefix: &str) -> StoreResult<Vec<String>> {
        let pattern = glob_escape(prefix);
        let mut keys = BTreeSet::new();
        let mut cursor: u64 = 0;
        loop {
            let (next, batch): (u64, Vec<String>) = redis::cmd("SCAN")
                .arg(cursor)
                .arg("MATCH")
                .arg(&pattern)
                .arg("COUNT")
                .arg(SCAN_BATCH)
                .query(&mut self.conn)?;
            keys.extend(batch);
            if next == 0 {
                break;
            }
            cursor = next;
        }
        Ok(keys.into_iter().collect())
    }
}
