//! Write transactions over the key tables.

use crate::backend::StoreResult;
use rusqlite::{Connection, Params, params};

/// An `IMMEDIATE` transaction that holds the database write lock.
///
/// Dropping it without [`commit`](Self::commit) rolls every statement back,
/// so an early `?` return leaves the store untouched.
pub struct Transaction<'a> {
    conn: &'a Connection,
    done: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self { conn, done: false }
    }

    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    /// Runs one statement inside the transaction.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        Ok(self.conn.execute(sql, params)?)
    }

    /// Writes a string key, replacing any string already there.
    pub(crate) fn put_string(&self, key: &str, value: &str) -> StoreResult<()> {
        self.execute(
            "INSERT INTO strings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Removes `key` whatever type it holds; returns whether it existed.
    pub(crate) fn remove_key(&self, key: &str) -> StoreResult<bool> {
        let mut rows = 0;
        for table in ["strings", "set_members", "list_items"] {
            rows += self.execute(&format!("DELETE FROM {table} WHERE key = ?1"), [key])?;
        }
        Ok(rows > 0)
    }

    pub fn commit(mut self) -> StoreResult<()> {
        self.conn.execute_batch("COMMIT")?;
        self.done = true;
        Ok(())
    }

    pub fn rollback(mut self) -> StoreResult<()> {
        self.conn.execute_batch("ROLLBACK")?;
        self.done = true;
        Ok(())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if !self.done {
            // Nothing useful to do with an error here
            let _ = self.conn.execute_batch("ROLLBACK");
        }
    }
}
