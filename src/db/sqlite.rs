use std::path::Path;

use rusqlite::Connection;
use tracing;

use super::DatabaseError;

/// Schema bootstrap script: eight idempotent CREATE TABLE statements.
const SCHEMA_SQL: &str = include_str!("../../resources/schema.sql");

/// Open a SQLite connection to the given path and bootstrap the schema
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

/// Open an in-memory database (for testing)
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    initialize_schema(&conn)?;
    Ok(conn)
}

pub(crate) fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "PRAGMA journal_mode=DELETE;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Run the idempotent schema bootstrap.
///
/// Safe to re-run on an already bootstrapped database; not safe to run
/// concurrently with itself. Invoked once per process start.
pub fn initialize_schema(conn: &Connection) -> Result<(), DatabaseError> {
    tracing::info!("Bootstrapping schema");
    conn.execute_batch(SCHEMA_SQL)
        .map_err(|e| DatabaseError::BootstrapFailed {
            reason: e.to_string(),
        })?;
    Ok(())
}

/// Count tables in the database (for verification)
pub fn count_tables(conn: &Connection) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        [],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}
