use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::Patient;

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (first_name, last_name, date_of_birth, gender, blood_type,
         address, phone, email, allergies, medical_history, primary_doctor_id, active,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            patient.first_name,
            patient.last_name,
            patient.date_of_birth.to_string(),
            patient.gender,
            patient.blood_type,
            patient.address,
            patient.phone,
            patient.email,
            patient.allergies,
            patient.medical_history,
            patient.primary_doctor_id,
            patient.active as i32,
            patient.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            patient.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_patient(conn: &Connection, id: i64) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, gender, blood_type, address,
         phone, email, allergies, medical_history, primary_doctor_id, active,
         created_at, updated_at
         FROM patients WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], row_to_patient) {
        Ok(patient) => Ok(Some(patient)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, gender, blood_type, address,
         phone, email, allergies, medical_history, primary_doctor_id, active,
         created_at, updated_at
         FROM patients ORDER BY last_name, first_name",
    )?;

    let rows = stmt.query_map([], row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn list_patients_by_doctor(
    conn: &Connection,
    doctor_id: i64,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, gender, blood_type, address,
         phone, email, allergies, medical_history, primary_doctor_id, active,
         created_at, updated_at
         FROM patients WHERE primary_doctor_id = ?1 ORDER BY last_name, first_name",
    )?;

    let rows = stmt.query_map(params![doctor_id], row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

pub fn search_patients(conn: &Connection, term: &str) -> Result<Vec<Patient>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, date_of_birth, gender, blood_type, address,
         phone, email, allergies, medical_history, primary_doctor_id, active,
         created_at, updated_at
         FROM patients
         WHERE LOWER(first_name) LIKE LOWER(?1) OR LOWER(last_name) LIKE LOWER(?1)
         ORDER BY last_name, first_name",
    )?;

    let rows = stmt.query_map(params![pattern], row_to_patient)?;
    rows.map(|r| r.map_err(DatabaseError::from)).collect()
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_patient(conn: &Connection, patient: &Patient) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE patients SET first_name = ?1, last_name = ?2, date_of_birth = ?3,
         gender = ?4, blood_type = ?5, address = ?6, phone = ?7, email = ?8,
         allergies = ?9, medical_history = ?10, primary_doctor_id = ?11, active = ?12,
         updated_at = ?13
         WHERE id = ?14",
        params![
            patient.first_name,
            patient.last_name,
            patient.date_of_birth.to_string(),
            patient.gender,
            patient.blood_type,
            patient.address,
            patient.phone,
            patient.email,
            patient.allergies,
            patient.medical_history,
            patient.primary_doctor_id,
            patient.active as i32,
            patient.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            patient.id,
        ],
    )?;
    Ok(affected > 0)
}

/// Soft delete: mark inactive, keep the row and every dependent record.
pub fn deactivate_patient(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let now = chrono::Local::now()
        .naive_local()
        .format("%Y-%m-%d %H:%M:%S")
        .to_string();
    let affected = conn.execute(
        "UPDATE patients SET active = 0, updated_at = ?2 WHERE id = ?1",
        params![id, now],
    )?;
    Ok(affected > 0)
}

/// Hard delete; the schema cascades to records, medications, labs and notes.
pub fn delete_patient(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM patients WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

fn row_to_patient(row: &rusqlite::Row<'_>) -> Result<Patient, rusqlite::Error> {
    Ok(Patient {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        date_of_birth: NaiveDate::parse_from_str(&row.get::<_, String>(3)?, "%Y-%m-%d")
            .unwrap_or_default(),
        gender: row.get(4)?,
        blood_type: row.get(5)?,
        address: row.get(6)?,
        phone: row.get(7)?,
        email: row.get(8)?,
        allergies: row.get(9)?,
        medical_history: row.get(10)?,
        primary_doctor_id: row.get(11)?,
        active: row.get::<_, i32>(12)? != 0,
        created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(13)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        updated_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(14)?, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
