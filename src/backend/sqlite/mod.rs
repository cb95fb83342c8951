//! SQLite-backed key store.

mod connection;
mod repo_impl;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// Key store kept in a local SQLite file.
///
/// Strings, sets and lists live in separate tables keyed by name. Every
/// primitive that touches more than one row runs inside an immediate
/// transaction, so `incr` and `rename` stay atomic when several processes
/// share the file.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
