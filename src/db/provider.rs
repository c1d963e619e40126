//! Connection provider: one new physical connection per call.
//!
//! The provider caches the resolved store location, nothing else: no
//! pooling, no retry, no connection reuse. Every caller gets a fresh
//! `Connection` and releases it by letting it drop. The lazy singleton
//! initialization is the only lock in the crate.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use rusqlite::Connection;

use crate::config::StoreConfig;

use super::sqlite::configure_pragmas;
use super::DatabaseError;

static SHARED: OnceLock<ConnectionProvider> = OnceLock::new();

pub struct ConnectionProvider {
    database_path: PathBuf,
}

impl ConnectionProvider {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            database_path: config.database_path.clone(),
        }
    }

    /// Process-wide provider; configuration is resolved once on first use.
    pub fn shared() -> &'static ConnectionProvider {
        SHARED.get_or_init(|| {
            let config = StoreConfig::load_or_default();
            tracing::debug!("Connection provider using {}", config.database_path.display());
            ConnectionProvider::new(&config)
        })
    }

    /// Open a new connection to the configured store.
    ///
    /// Called once per data-access operation; connectivity failures
    /// propagate to the caller, which decides whether to surface them.
    pub fn connect(&self) -> Result<Connection, DatabaseError> {
        let conn = Connection::open(&self.database_path)?;
        configure_pragmas(&conn)?;
        Ok(conn)
    }

    pub fn database_path(&self) -> &Path {
        &self.database_path
    }
}
