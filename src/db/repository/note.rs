use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Note;

pub fn insert_note(conn: &Connection, note: &Note) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO notes (patient_id, author_id, title, body, is_urgent, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            note.patient_id,
            note.author_id,
            note.title,
            note.body,
            note.is_urgent as i32,
            note.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            note.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_note(conn: &Connection, id: i64) -> Result<Option<Note>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, author_id, title, body, is_urgent, created_at, updated_at
         FROM notes WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], row_to_note) {
        Ok(note) => Ok(Some(note)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Notes for a patient: urgent first, newest within each urgency class.
pub fn list_notes_by_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Note>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, author_id, title, body, is_urgent, created_at, updated_at
         FROM notes WHERE patient_id = ?1
         ORDER BY is_urgent DESC, created_at DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_note)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// All urgent notes across patients, newest first.
pub fn list_urgent_notes(conn: &Connection) -> Result<Vec<Note>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, author_id, title, body, is_urgent, created_at, updated_at
         FROM notes WHERE is_urgent = 1 ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map([], row_to_note)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn search_notes(conn: &Connection, term: &str) -> Result<Vec<Note>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, author_id, title, body, is_urgent, created_at, updated_at
         FROM notes
         WHERE LOWER(title) LIKE LOWER(?1) OR LOWER(body) LIKE LOWER(?1)
         ORDER BY created_at DESC",
    )?;

    let rows = stmt.query_map(params![pattern], row_to_note)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_note(conn: &Connection, note: &Note) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE notes SET patient_id = ?1, author_id = ?2, title = ?3, body = ?4,
         is_urgent = ?5, updated_at = ?6
         WHERE id = ?7",
        params![
            note.patient_id,
            note.author_id,
            note.title,
            note.body,
            note.is_urgent as i32,
            note.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            note.id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete_note(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM notes WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn row_to_note(row: &rusqlite::Row<'_>) -> Result<Note, rusqlite::Error> {
    Ok(Note {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        author_id: row.get(2)?,
        title: row.get(3)?,
        body: row.get(4)?,
        is_urgent: row.get::<_, i32>(5)? != 0,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(6)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        updated_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(7)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
