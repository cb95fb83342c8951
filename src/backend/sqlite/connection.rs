//! Connection management for SqliteStore.

use super::SqliteStore;
use super::transaction::Transaction;
use crate::backend::schema::create_schema;
use crate::backend::{StoreError, StoreResult};
use rusqlite::Connection;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another process to release the file.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

impl SqliteStore {
    // ===========================================
    // In-Memory Connection
    // ===========================================

    /// Opens an in-memory store.
    ///
    /// Used by tests and benchmarks; nothing survives the connection.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = Connection::open_in_memory()?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // File-Based Connection
    // ===========================================

    /// Opens or creates a store at the given path.
    ///
    /// Creates parent directories if they don't exist.
    pub fn open(path: &Path) -> StoreResult<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(format!("{}: {}", path.display(), e)))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        create_schema(&conn)?;
        Ok(Self { conn })
    }

    // ===========================================
    // Connection Accessors
    // ===========================================

    /// Returns a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    // ===========================================
    // Transaction Support
    // ===========================================

    /// Begins an immediate transaction, taking the write lock up front.
    ///
    /// The transaction will automatically rollback on drop unless `commit()` is called.
    pub fn transaction(&mut self) -> StoreResult<Transaction<'_>> {
        self.conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(Transaction::new(&self.conn))
    }
}
