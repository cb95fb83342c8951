//! KeyStore trait implementation for SqliteStore.

use super::SqliteStore;
use crate::backend::{KeyStore, StoreError, StoreResult};
use rusqlite::{Connection, OptionalExtension, params};
use std::collections::BTreeSet;

// ===========================================
// Row Helpers
// ===========================================

fn members(conn: &Connection, key: &str) -> rusqlite::Result<BTreeSet<String>> {
    let mut stmt = conn.prepare("SELECT member FROM set_members WHERE key = ?1")?;
    let rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
    rows.collect()
}

fn key_exists(conn: &Connection, key: &str) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM strings WHERE key = ?1)
             OR EXISTS(SELECT 1 FROM set_members WHERE key = ?1)
             OR EXISTS(SELECT 1 FROM list_items WHERE key = ?1)",
        [key],
        |row| row.get(0),
    )
}

fn difference(conn: &Connection, keys: &[String]) -> rusqlite::Result<BTreeSet<String>> {
    let Some((first, rest)) = keys.split_first() else {
        return Ok(BTreeSet::new());
    };
    let mut result = members(conn, first)?;
    for key in rest {
        if result.is_empty() {
            break;
        }
        for member in members(conn, key)? {
            result.remove(&member);
        }
    }
    Ok(result)
}

// ===========================================
// KeyStore Implementation
// ===========================================

impl KeyStore for SqliteStore {
    fn incr(&mut self, key: &str) -> StoreResult<i64> {
        let tx = self.transaction()?;

        let current: Option<String> = tx
            .conn()
            .query_row("SELECT value FROM strings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?;

        let value = match current {
            None => 0,
            Some(raw) => raw.parse::<i64>().map_err(|_| StoreError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
            })?,
        } + 1;

        tx.put_string(key, &value.to_string())?;
        tx.commit()?;
        Ok(value)
    }

    fn get(&mut self, key: &str) -> StoreResult<Option<String>> {
        Ok(self
            .conn
            .query_row("SELECT value FROM strings WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()?)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO strings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn set_nx(&mut self, key: &str, value: &str) -> StoreResult<bool> {
        let tx = self.transaction()?;
        if key_exists(tx.conn(), key)? {
            return Ok(false);
        }
        tx.put_string(key, value)?;
        tx.commit()?;
        Ok(true)
    }

    fn sadd(&mut self, key: &str, new_members: &[String]) -> StoreResult<usize> {
        if new_members.is_empty() {
            return Ok(0);
        }
        let tx = self.transaction()?;
        let mut added = 0;
        for member in new_members {
            added += tx.execute(
                "INSERT OR IGNORE INTO set_members (key, member) VALUES (?1, ?2)",
                params![key, member],
            )?;
        }
        tx.commit()?;
        Ok(added)
    }

    fn srem(&mut self, key: &str, old_members: &[String]) -> StoreResult<usize> {
        if old_members.is_empty() {
            return Ok(0);
        }
        let tx = self.transaction()?;
        let mut removed = 0;
        for member in old_members {
            removed += tx.execute(
                "DELETE FROM set_members WHERE key = ?1 AND member = ?2",
                params![key, member],
            )?;
        }
        tx.commit()?;
        Ok(removed)
    }

    fn smembers(&mut self, key: &str) -> StoreResult<BTreeSet<String>> {
        Ok(members(&self.conn, key)?)
    }

    fn scard(&mut self, key: &str) -> StoreResult<usize> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM set_members WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }

    fn sdiff(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        // One snapshot for all the sets involved
        let tx = self.transaction()?;
        let result = difference(tx.conn(), keys)?;
        tx.commit()?;
        Ok(result)
    }

    fn sinter(&mut self, keys: &[String]) -> StoreResult<BTreeSet<String>> {
        let Some((first, rest)) = keys.split_first() else {
            return Ok(BTreeSet::new());
        };
        let tx = self.transaction()?;
        let mut result = members(tx.conn(), first)?;
        for key in rest {
            if result.is_empty() {
                break;
            }
            let other = members(tx.conn(), key)?;
            result.retain(|member| other.contains(member));
        }
        tx.commit()?;
        Ok(result)
    }

    fn sdiffstore(&mut self, dest: &str, keys: &[String]) -> StoreResult<usize> {
        let tx = self.transaction()?;
        let result = difference(tx.conn(), keys)?;
        tx.remove_key(dest)?;
        for member in &result {
            tx.execute(
                "INSERT INTO set_members (key, member) VALUES (?1, ?2)",
                params![dest, member],
            )?;
        }
        tx.commit()?;
        Ok(result.len())
    }

    fn rpush(&mut self, key: &str, items: &[String]) -> StoreResult<usize> {
        let tx = self.transaction()?;
        let last: i64 = tx.conn().query_row(
            "SELECT COALESCE(MAX(position), -1) FROM list_items WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        for (offset, item) in items.iter().enumerate() {
            tx.execute(
                "INSERT INTO list_items (key, position, item) VALUES (?1, ?2, ?3)",
                params![key, last + 1 + offset as i64, item],
            )?;
        }
        let len: i64 = tx.conn().query_row(
            "SELECT COUNT(*) FROM list_items WHERE key = ?1",
            [key],
            |row| row.get(0),
        )?;
        tx.commit()?;
        Ok(len as usize)
    }

    fn lrange_all(&mut self, key: &str) -> StoreResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT item FROM list_items WHERE key = ?1 ORDER BY position")?;
        let rows = stmt.query_map([key], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn del(&mut self, keys: &[String]) -> StoreResult<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let tx = self.transaction()?;
        let mut removed = 0;
        for key in keys {
            if tx.remove_key(key)? {
                removed += 1;
            }
        }
        tx.commit()?;
        Ok(removed)
    }

    fn rename(&mut self, from: &str, to: &str) -> StoreResult<()> {
        let tx = self.transaction()?;
        if !key_exists(tx.conn(), from)? {
            return Err(StoreError::NoSuchKey {
                key: from.to_string(),
            });
        }
        if from != to {
            tx.remove_key(to)?;
            tx.execute("UPDATE strings SET key = ?2 WHERE key = ?1", params![from, to])?;
            tx.execute(
                "UPDATE set_members SET key = ?2 WHERE key = ?1",
                params![from, to],
            )?;
            tx.execute(
                "UPDATE list_items SET key = ?2 WHERE key = ?1",
                params![from, to],
            )?;
        }
        tx.commit()
    }

    fn exists(&mut self, key: &str) -> StoreResult<bool> {
        Ok(key_exists(&self.conn, key)?)
    }

    fn keys_with_prefix(&mut self, prefix: &str) -> StoreResult<Vec<String>> {
        // substr() instead of LIKE so '%' and '_' in keys need no escaping
        let mut stmt = self.conn.prepare(
            "SELECT key FROM strings WHERE substr(key, 1, length(?1)) = ?1
             UNION
             SELECT key FROM set_members WHERE substr(key, 1, length(?1)) = ?1
             UNION
             SELECT key FROM list_items WHERE substr(key, 1, length(?1)) = ?1
             ORDER BY key",
        )?;
        let rows = stmt.query_map([prefix], |row| row.get::<_, String>(0))?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }
}
