use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum HealthLogType {
    #[default]
    #[display("Vet Visit")]
    VetVisit,
    #[display("Vaccination")]
    Vaccination,
    #[display("Grooming")]
    Grooming,
    #[display("Weight")]
    Weight,
    #[display("Temperature")]
    Temperature,
    #[display("Medication")]
    Medication,
}

impl HealthLogType {
    pub const ALL: [Self; 6] = [
        Self::VetVisit,
        Self::Vaccination,
        Self::Grooming,
        Self::Weight,
        Self::Temperature,
        Self::Medication,
    ];
}

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct HealthLog {
    pub id: i64,
    pub pet_id: i64,
    pub log_type: HealthLogType,
    pub title: String,
    pub notes: String,
    pub value: Option<f64>,
    /// date the event happened, chosen by the user
    pub logged_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a health log coming from the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct HealthLogInput {
    pub log_type: HealthLogType,
    pub title: String,
    pub notes: String,
    pub value: Option<f64>,
    pub logged_at: DateTime<Utc>,
}
