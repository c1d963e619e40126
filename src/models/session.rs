use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub created_at: NaiveDateTime,
    pub expires_at: NaiveDateTime,
}

impl Session {
    /// New session with a random token, valid for `ttl_minutes` from now.
    /// Timestamps are truncated to whole seconds, the stored precision.
    pub fn issue(user_id: i64, ttl_minutes: i64) -> Self {
        let now = chrono::Local::now().naive_local();
        let now = now.with_nanosecond(0).unwrap_or(now);
        Self {
            id: 0,
            user_id,
            token: Uuid::new_v4().to_string(),
            created_at: now,
            expires_at: now + Duration::minutes(ttl_minutes),
        }
    }

    pub fn is_expired(&self, now: NaiveDateTime) -> bool {
        self.expires_at <= now
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub id: i64,
    pub username: String,
    pub succeeded: bool,
    pub attempted_at: NaiveDateTime,
}
