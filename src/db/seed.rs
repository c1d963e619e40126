//! Seed accounts, inserted once into an empty store.
//!
//! The gate is the row count of `users`: anything already there, even a
//! single account, means the store has been provisioned and the seed is
//! skipped. The insertion batch is the only multi-statement transaction
//! in the crate.

use chrono::Local;
use rusqlite::{params, Connection};

use crate::credential;

use super::DatabaseError;

/// Fixed accounts: id, username, password, role, first name, last name.
const SEED_ACCOUNTS: [(i64, &str, &str, &str, &str, &str); 4] = [
    (1, "admin", "admin123", "admin", "System", "Administrator"),
    (2, "doctor", "doctor123", "doctor", "John", "Smith"),
    (3, "patient", "patient123", "patient", "Jane", "Doe"),
    (4, "lab", "lab123", "laboratory", "Lab", "Technician"),
];

/// Insert the fixed seed accounts if the `users` table is empty.
///
/// Returns the number of accounts inserted (0 when the table already had
/// rows). Each password is hashed with a fresh random salt, so reseeded
/// stores never share credentials byte-for-byte.
pub fn seed_accounts(conn: &mut Connection) -> Result<usize, DatabaseError> {
    let existing: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    if existing > 0 {
        tracing::debug!("Users table already populated, skipping seed accounts");
        return Ok(0);
    }

    let now = Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();

    let tx = conn.transaction()?;
    for (id, username, password, role, first_name, last_name) in SEED_ACCOUNTS {
        let salt = credential::generate_salt();
        let hash = credential::hash_password(password, &salt);
        tx.execute(
            "INSERT INTO users (id, username, password_hash, salt, role, first_name, last_name,
             active, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?8)",
            params![
                id,
                username,
                hash,
                credential::encode_salt(&salt),
                role,
                first_name,
                last_name,
                now,
            ],
        )?;
    }
    tx.commit()?;

    tracing::info!(count = SEED_ACCOUNTS.len(), "Inserted seed accounts");
    Ok(SEED_ACCOUNTS.len())
}
