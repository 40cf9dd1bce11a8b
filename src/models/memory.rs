use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct Memory {
    pub id: i64,
    pub pet_id: i64,
    pub image_url: String,
    pub caption: String,
    pub ai_hint: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewMemory {
    pub image_url: String,
    pub caption: String,
    pub ai_hint: Option<String>,
}
