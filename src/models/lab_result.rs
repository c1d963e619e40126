use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabResult {
    pub id: i64,
    pub patient_id: i64,
    pub ordered_by: Option<i64>,
    pub performed_by: Option<i64>,
    pub test_name: String,
    pub test_date: NaiveDate,
    pub result_value: Option<String>,
    pub unit: Option<String>,
    pub reference_range: Option<String>,
    pub is_pending: bool,
    pub is_urgent: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
