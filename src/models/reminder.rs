use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderType {
    #[default]
    #[display("Vaccination")]
    Vaccination,
    #[display("Appointment")]
    Appointment,
    #[display("Grooming")]
    Grooming,
    #[display("Medication")]
    Medication,
}

impl ReminderType {
    pub const ALL: [Self; 4] = [
        Self::Vaccination,
        Self::Appointment,
        Self::Grooming,
        Self::Medication,
    ];
}

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct Reminder {
    pub id: i64,
    pub pet_id: i64,
    pub reminder_type: ReminderType,
    pub name: String,
    pub due_date: NaiveDate,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields of a reminder coming from the add/edit form
#[derive(Debug, Clone, PartialEq)]
pub struct ReminderInput {
    pub reminder_type: ReminderType,
    pub name: String,
    pub due_date: NaiveDate,
    pub notes: String,
}
