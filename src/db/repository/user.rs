use std::str::FromStr;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection};

use crate::db::DatabaseError;
use crate::models::enums::Role;
use crate::models::User;

pub fn insert_user(conn: &Connection, user: &User) -> Result<i64, DatabaseError> {
    conn.execute(
        "INSERT INTO users (username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            user.username,
            user.password_hash,
            user.salt,
            user.role.as_str(),
            user.first_name,
            user.last_name,
            user.email,
            user.phone,
            user.active as i32,
            user.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            user.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_user(conn: &Connection, id: i64) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at
         FROM users WHERE id = ?1",
    )?;

    match stmt.query_row(params![id], user_row_from_rusqlite) {
        Ok(row) => Ok(Some(user_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn get_user_by_username(
    conn: &Connection,
    username: &str,
) -> Result<Option<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at
         FROM users WHERE username = ?1",
    )?;

    match stmt.query_row(params![username], user_row_from_rusqlite) {
        Ok(row) => Ok(Some(user_from_row(row)?)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn list_users(conn: &Connection) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at
         FROM users ORDER BY username",
    )?;

    let rows = stmt.query_map([], |row| Ok(user_row_from_rusqlite(row)))?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row??)?);
    }
    Ok(users)
}

pub fn list_users_by_role(conn: &Connection, role: &Role) -> Result<Vec<User>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at
         FROM users WHERE role = ?1 ORDER BY username",
    )?;

    let rows = stmt.query_map(params![role.as_str()], |row| Ok(user_row_from_rusqlite(row)))?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row??)?);
    }
    Ok(users)
}

pub fn search_users(conn: &Connection, term: &str) -> Result<Vec<User>, DatabaseError> {
    let pattern = format!("%{term}%");
    let mut stmt = conn.prepare(
        "SELECT id, username, password_hash, salt, role, first_name, last_name,
         email, phone, active, created_at, updated_at
         FROM users
         WHERE LOWER(username) LIKE LOWER(?1)
            OR LOWER(first_name) LIKE LOWER(?1)
            OR LOWER(last_name) LIKE LOWER(?1)
         ORDER BY username",
    )?;

    let rows = stmt.query_map(params![pattern], |row| Ok(user_row_from_rusqlite(row)))?;

    let mut users = Vec::new();
    for row in rows {
        users.push(user_from_row(row??)?);
    }
    Ok(users)
}

/// Full-row replace by primary key; `created_at` is never rewritten.
pub fn update_user(conn: &Connection, user: &User) -> Result<bool, DatabaseError> {
    let affected = conn.execute(
        "UPDATE users SET username = ?1, password_hash = ?2, salt = ?3, role = ?4,
         first_name = ?5, last_name = ?6, email = ?7, phone = ?8, active = ?9, updated_at = ?10
         WHERE id = ?11",
        params![
            user.username,
            user.password_hash,
            user.salt,
            user.role.as_str(),
            user.first_name,
            user.last_name,
            user.email,
            user.phone,
            user.active as i32,
            user.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            user.id,
        ],
    )?;
    Ok(affected > 0)
}

pub fn delete_user(conn: &Connection, id: i64) -> Result<bool, DatabaseError> {
    let affected = conn.execute("DELETE FROM users WHERE id = ?1", params![id])?;
    Ok(affected > 0)
}

// Internal row type for User mapping
struct UserRow {
    id: i64,
    username: String,
    password_hash: String,
    salt: String,
    role: String,
    first_name: String,
    last_name: String,
    email: Option<String>,
    phone: Option<String>,
    active: i32,
    created_at: String,
    updated_at: String,
}

fn user_row_from_rusqlite(row: &rusqlite::Row<'_>) -> Result<UserRow, rusqlite::Error> {
    Ok(UserRow {
        id: row.get(0)?,
        username: row.get(1)?,
        password_hash: row.get(2)?,
        salt: row.get(3)?,
        role: row.get(4)?,
        first_name: row.get(5)?,
        last_name: row.get(6)?,
        email: row.get(7)?,
        phone: row.get(8)?,
        active: row.get(9)?,
        created_at: row.get(10)?,
        updated_at: row.get(11)?,
    })
}

fn user_from_row(row: UserRow) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.id,
        username: row.username,
        password_hash: row.password_hash,
        salt: row.salt,
        role: Role::from_str(&row.role)?,
        first_name: row.first_name,
        last_name: row.last_name,
        email: row.email,
        phone: row.phone,
        active: row.active != 0,
        created_at: NaiveDateTime::parse_from_str(&row.created_at, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
        updated_at: NaiveDateTime::parse_from_str(&row.updated_at, "%Y-%m-%d %H:%M:%S")
            .unwrap_or_default(),
    })
}
