use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::MedicalRecord;

pub fn insert_medical_record(
    conn: &Connection,
    record: &MedicalRecord,
) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO medical_records (patient_id, doctor_id, visit_date, chief_complaint,
         diagnosis, treatment, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.patient_id,
            record.doctor_id,
            record.visit_date.to_string(),
            record.chief_complaint,
            record.diagnosis,
            record.treatment,
            record.notes,
            record.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_medical_record(
    conn: &Connection,
    id: i64,
) -> Result<Option<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, visit_date, chief_complaint, diagnosis,
         treatment, notes, created_at, updated_at
         FROM medical_records WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], row_to_medical_record) {
        Ok(record) => Ok(Some(record)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Visit history for a patient, most recent visit first.
pub fn list_records_by_patient(
    conn: &Connection,
    patient_id: i64,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, visit_date, chief_complaint, diagnosis,
         treatment, notes, created_at, updated_at
         FROM medical_records WHERE patient_id = ?1 ORDER BY visit_date DESC",
    )?;

    let rows = stmt.query_map(params![patient_id], row_to_medical_record)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_records_by_doctor(
    conn: &Connection,
    doctor_id: i64,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, visit_date, chief_complaint, diagnosis,
         treatment, notes, created_at, updated_at
         FROM medical_records WHERE doctor_id = ?1 ORDER BY visit_date DESC",
    )?;

    let rows = stmt.query_map(params![doctor_id], row_to_medical_record)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn search_medical_records(
    conn: &Connection,
    term: &str,
) -> Result<Vec<MedicalRecord>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, doctor_id, visit_date, chief_complaint, diagnosis,
         treatment, notes, created_at, updated_at
         FROM medical_records
         WHERE LOWER(diagnosis) LIKE LOWER(?1) OR LOWER(chief_complaint) LIKE LOWER(?1)
         ORDER BY visit_date DESC",
    )?;

    let rows = stmt.query_map(params![pattern], row_to_medical_record)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_medical_record(
    conn: &Connection,
    record: &MedicalRecord,
) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE medical_records SET patient_id = ?1, doctor_id = ?2, visit_date = ?3,
         chief_complaint = ?4, diagnosis = ?5, treatment = ?6, notes = ?7, updated_at = ?8
         WHERE id = ?9",
        params![
            record.patient_id,
            record.doctor_id,
            record.visit_date.to_string(),
            record.chief_complaint,
            record.diagnosis,
            record.treatment,
            record.notes,
            record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            record.id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete_medical_record(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM medical_records WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn row_to_medical_record(row: &rusqlite::Row<'_>) -> Result<MedicalRecord, rusqlite::Error> {
    Ok(MedicalRecord {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        visit_date: NaiveDate::parse_from_str(&row.get::<_, String>(3)?, "%Y-%m-%d")
            .unwrap_or_default(),
        chief_complaint: row.get(4)?,
        diagnosis: row.get(5)?,
        treatment: row.get(6)?,
        notes: row.get(7)?,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(8)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        updated_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(9)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
