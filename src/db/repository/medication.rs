use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Medication;

pub fn insert_medication(conn: &Connection, med: &Medication) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medications (patient_id, prescriber_id, name, dosage, frequency,
         start_date, end_date, instructions, is_current, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            med.patient_id,
            med.prescriber_id,
            med.name,
            med.dosage,
            med.frequency,
            med.start_date.map(|d| d.to_string()),
            med.end_date.map(|d| d.to_string()),
            med.instructions,
            med.is_current as i32,
            med.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_medication(conn: &Connection, id: i64) -> Result<Option<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, prescriber_id, name, dosage, frequency, start_date,
         end_date, instructions, is_current, created_at
         FROM medications WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], row_to_medication) {
        Ok(med) => Ok(Some(med)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Medication list for a patient: current prescriptions first, then most
/// recent start date.
pub fn list_medications_by_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, prescriber_id, name, dosage, frequency, start_date,
         end_date, instructions, is_current, created_at
         FROM medications WHERE patient_id = ?1
         ORDER BY is_current DESC, start_date DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_medication)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_current_medications(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<Medication>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, prescriber_id, name, dosage, frequency, start_date,
         end_date, instructions, is_current, created_at
         FROM medications WHERE patient_id = ?1 AND is_current = 1
         ORDER BY start_date DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_medication)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn search_medications(conn: &Connection, term: &str) -> Result<Vec<Medication>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, prescriber_id, name, dosage, frequency, start_date,
         end_date, instructions, is_current, created_at
         FROM medications WHERE LOWER(name) LIKE LOWER(?1)
         ORDER BY name",
    )?;

    let rows = stmt.query_map(params![pattern], row_to_medication)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_medication(conn: &Connection, med: &Medication) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE medications SET patient_id = ?1, prescriber_id = ?2, name = ?3,
         dosage = ?4, frequency = ?5, start_date = ?6, end_date = ?7,
         instructions = ?8, is_current = ?9
         WHERE id = ?10",
        params![
            med.patient_id,
            med.prescriber_id,
            med.name,
            med.dosage,
            med.frequency,
            med.start_date.map(|d| d.to_string()),
            med.end_date.map(|d| d.to_string()),
            med.instructions,
            med.is_current as i32,
            med.id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete_medication(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM medications WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn row_to_medication(row: &rusqlite::Row<'_>) -> Result<Medication, rusqlite::Error> {
    Ok(Medication {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        prescriber_id: row.get(2)?,
        name: row.get(3)?,
        dosage: row.get(4)?,
        frequency: row.get(5)?,
        start_date: row
            .get::<_, Option<String>>(6)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        end_date: row
            .get::<_, Option<String>>(7)?
            .and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok()),
        instructions: row.get(8)?,
        is_current: row.get::<_, i32>(9)? != 0,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(10)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
