use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    #[default]
    #[display("Walk")]
    Walk,
    #[display("Play")]
    Play,
    #[display("Training")]
    Training,
}

impl ActivityType {
    pub const ALL: [Self; 3] = [Self::Walk, Self::Play, Self::Training];
}

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct ActivityLog {
    pub id: i64,
    pub pet_id: i64,
    pub activity_type: ActivityType,
    pub duration_minutes: i64,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewActivityLog {
    pub activity_type: ActivityType,
    pub duration_minutes: i64,
    pub notes: Option<String>,
}
