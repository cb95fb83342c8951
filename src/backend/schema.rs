//! SQLite schema for the local key store.

use rusqlite::Connection;

/// Current schema version.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the tables backing the key store.
///
/// Idempotent. A key lives in exactly one of the three value tables,
/// matching the type of value it holds.
///
/// # Tables Created
/// - `strings` - string values (`get`/`set`/`incr`)
/// - `set_members` - one row per set member
/// - `list_items` - one row per list item, ordered by `position`
/// - `schema_version` - schema version tracking
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS strings (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS set_members (
            key TEXT NOT NULL,
            member TEXT NOT NULL,
            PRIMARY KEY (key, member)
        );

        CREATE TABLE IF NOT EXISTS list_items (
            key TEXT NOT NULL,
            position INTEGER NOT NULL,
            item TEXT NOT NULL,
            PRIMARY KEY (key, position)
        );

        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER NOT NULL
        );",
    )?;

    let has_version: bool =
        conn.query_row("SELECT EXISTS(SELECT 1 FROM schema_version)", [], |row| {
            row.get(0)
        })?;
    if !has_version {
        conn.execute(
            "INSERT INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        conn.query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1",
            [name],
            |_| Ok(true),
        )
        .unwrap_or(false)
    }

    #[test]
    fn creates_all_tables() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        for table in ["strings", "set_members", "list_items", "schema_version"] {
            assert!(table_exists(&conn, table), "{table} should exist");
        }
    }

    #[test]
    fn is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        create_schema(&conn).unwrap();

        let versions: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(versions, 1, "version row should be written once");
    }

    #[test]
    fn records_current_version() {
        let conn = Connection::open_in_memory().unwrap();
        create_schema(&conn).unwrap();
        let version: i64 = conn
            .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(version, SCHEMA_VERSION);
    }
}
