use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub patient_id: i64,
    pub author_id: Option<i64>,
    pub title: Option<String>,
    pub body: String,
    pub is_urgent: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
