use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::{LoginAttempt, Session};

pub fn insert_session(conn: &Connection, session: &Session) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO sessions (user_id, token, created_at, expires_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            session.user_id,
            session.token,
            session.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            session.expires_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_session_by_token(
    conn: &Connection,
    token: &str,
) -> Result<Option<Session>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, token, created_at, expires_at
         FROM sessions WHERE token = ?1",
    )?;

    match stmt.query_row(params![token], row_to_session) {
        Ok(session) => Ok(Some(session)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn delete_session_by_token(conn: &Connection, token: &str) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM sessions WHERE token = ?1", params![token])?;
    Ok(affected > 0)
}

/// Drop every session that expired at or before `now`. Returns how many
/// rows were removed. Timestamps are stored in a lexicographically
/// sortable text form, so the comparison runs in SQL.
pub fn purge_expired_sessions(
    conn: &Connection,
    now: NaiveDateTime,
) -> Result<usize, DatabaseError> {
    let purged = conn.execute(
        "DELETE FROM sessions WHERE expires_at <= ?1",
        params![now.format("%Y-%m-%d %H:%M:%S").to_string()],
    )?;
    if purged > 0 {
        tracing::debug!(purged, "Purged expired sessions");
    }
    Ok(purged)
}

pub fn record_login_attempt(
    conn: &Connection,
    attempt: &LoginAttempt,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO login_attempts (username, succeeded, attempted_at)
         VALUES (?1, ?2, ?3)",
        params![
            attempt.username,
            attempt.succeeded as i32,
            attempt.attempted_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Failed attempts for a username at or after `since`, the lockout input.
pub fn count_recent_failed_logins(
    conn: &Connection,
    username: &str,
    since: NaiveDateTime,
) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM login_attempts
         WHERE username = ?1 AND succeeded = 0 AND attempted_at >= ?2",
        params![username, since.format("%Y-%m-%d %H:%M:%S").to_string()],
        |row| row.get(0),
    )?;
    Ok(count)
}

fn row_to_session(row: &rusqlite::Row<'_>) -> Result<Session, rusqlite::Error> {
    Ok(Session {
        id: row.get(0)?,
        user_id: row.get(1)?,
        token: row.get(2)?,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(3)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        expires_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(4)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
