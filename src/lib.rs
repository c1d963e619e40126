//! Data layer for a desktop clinical records manager.
//!
//! Typed entities (users, patients, records, medications, lab results,
//! notes), one repository per entity over an embedded SQLite store, a
//! connection provider with lazily-cached configuration, and an
//! idempotent schema bootstrap with seeded first-run accounts.

pub mod config;
pub mod credential;
pub mod db;
pub mod models;

use std::path::Path;

use rusqlite::Connection;
use tracing_subscriber::EnvFilter;

use db::DatabaseError;

/// Install the global tracing subscriber. Call once at startup.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("Chartkeeper starting v{}", config::APP_VERSION);
}

/// Open the configured store, creating schema and seed accounts on first run.
///
/// Subsequent data access goes through `db::ConnectionProvider`, which
/// opens a fresh connection per call; this returns the bootstrap handle
/// for callers that want it.
pub fn open_store() -> Result<Connection, DatabaseError> {
    open_store_at(db::ConnectionProvider::shared().database_path())
}

/// `open_store` against an explicit database path.
pub fn open_store_at(path: &Path) -> Result<Connection, DatabaseError> {
    let mut conn = db::sqlite::open_database(path)?;
    db::seed::seed_accounts(&mut conn)?;
    Ok(conn)
}
