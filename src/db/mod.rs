pub mod provider;
pub mod repository;
pub mod seed;
pub mod sqlite;

pub use provider::*;
pub use repository::*;
pub use seed::*;
pub use sqlite::*;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid enum value for {field}: {value}")]
    InvalidEnum { field: String, value: String },

    #[error("Schema bootstrap failed: {reason}")]
    BootstrapFailed { reason: String },
}
