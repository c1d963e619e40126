use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::LabResult;

pub fn insert_lab_result(conn: &Connection, lab: &LabResult) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO lab_results (patient_id, ordered_by, performed_by, test_name, test_date,
         result_value, unit, reference_range, is_pending, is_urgent, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            lab.patient_id,
            lab.ordered_by,
            lab.performed_by,
            lab.test_name,
            lab.test_date.to_string(),
            lab.result_value,
            lab.unit,
            lab.reference_range,
            lab.is_pending as i32,
            lab.is_urgent as i32,
            lab.notes,
            lab.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_lab_result(conn: &Connection, id: i64) -> Result<Option<LabResult>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, ordered_by, performed_by, test_name, test_date,
         result_value, unit, reference_range, is_pending, is_urgent, notes, created_at
         FROM lab_results WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], row_to_lab_result) {
        Ok(lab) => Ok(Some(lab)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Lab history for a patient: urgent results first, then most recent test.
pub fn list_lab_results_by_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<LabResult>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, ordered_by, performed_by, test_name, test_date,
         result_value, unit, reference_range, is_pending, is_urgent, notes, created_at
         FROM lab_results WHERE patient_id = ?1
         ORDER BY is_urgent DESC, test_date DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_lab_result)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Laboratory work queue: urgent orders first, oldest test date within each
/// urgency class.
pub fn list_pending_lab_results(conn: &Connection) -> Result<Vec<LabResult>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, ordered_by, performed_by, test_name, test_date,
         result_value, unit, reference_range, is_pending, is_urgent, notes, created_at
         FROM lab_results WHERE is_pending = 1
         ORDER BY is_urgent DESC, test_date",
    )?;

    let rows = stmt.query_map([], row_to_lab_result)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn search_lab_results(conn: &Connection, term: &str) -> Result<Vec<LabResult>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, ordered_by, performed_by, test_name, test_date,
         result_value, unit, reference_range, is_pending, is_urgent, notes, created_at
         FROM lab_results WHERE LOWER(test_name) LIKE LOWER(?1)
         ORDER BY test_date DESC",
    )?;

    let rows = stmt.query_map(params![pattern], row_to_lab_result)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_lab_result(conn: &Connection, lab: &LabResult) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE lab_results SET patient_id = ?1, ordered_by = ?2, performed_by = ?3,
         test_name = ?4, test_date = ?5, result_value = ?6, unit = ?7,
         reference_range = ?8, is_pending = ?9, is_urgent = ?10, notes = ?11
         WHERE id = ?12",
        params![
            lab.patient_id,
            lab.ordered_by,
            lab.performed_by,
            lab.test_name,
            lab.test_date.to_string(),
            lab.result_value,
            lab.unit,
            lab.reference_range,
            lab.is_pending as i32,
            lab.is_urgent as i32,
            lab.notes,
            lab.id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete_lab_result(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM lab_results WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn row_to_lab_result(row: &rusqlite::Row<'_>) -> Result<LabResult, rusqlite::Error> {
    Ok(LabResult {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        ordered_by: row.get(2)?,
        performed_by: row.get(3)?,
        test_name: row.get(4)?,
        test_date: NaiveDate::parse_from_str(&row.get::<_, String>(5)?, "%Y-%m-%d")
            .unwrap_or_default(),
        result_value: row.get(6)?,
        unit: row.get(7)?,
        reference_range: row.get(8)?,
        is_pending: row.get::<_, i32>(9)? != 0,
        is_urgent: row.get::<_, i32>(10)? != 0,
        notes: row.get(11)?,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(12)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
