use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

const LB_PER_KG: f64 = 2.204_622_6;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Species {
    #[default]
    #[display("Dog")]
    Dog,
    #[display("Cat")]
    Cat,
    #[display("Rabbit")]
    Rabbit,
    #[display("Bird")]
    Bird,
    #[display("Other")]
    Other,
}

impl Species {
    pub const ALL: [Self; 5] = [Self::Dog, Self::Cat, Self::Rabbit, Self::Bird, Self::Other];
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    #[display("Couch Potato")]
    CouchPotato,
    #[default]
    #[display("Playful")]
    Playful,
    #[display("Hyperactive")]
    Hyperactive,
}

impl ActivityLevel {
    pub const ALL: [Self; 3] = [Self::CouchPotato, Self::Playful, Self::Hyperactive];
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UnitPreference {
    #[default]
    #[display("Metric (kg)")]
    Metric,
    #[display("Imperial (lb)")]
    Imperial,
}

impl UnitPreference {
    pub const ALL: [Self; 2] = [Self::Metric, Self::Imperial];
}

#[derive(Debug, Default, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Pet {
    pub id: i64,
    pub user_app_id: i64,
    pub pet_name: String,
    pub species: Species,
    pub breed: String,
    /// years
    pub age: i64,
    /// kilograms
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub avatar_url: String,
    pub nickname: Option<String>,
    pub feeding_schedule: Option<String>,
    pub training_goal: Option<String>,
    pub unit_preference: UnitPreference,
    pub allergies: Option<String>,
    pub favorite_foods: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Weight converted to the pet's unit preference
    pub fn preferred_weight(&self) -> f64 {
        match self.unit_preference {
            UnitPreference::Metric => self.weight,
            UnitPreference::Imperial => self.weight * LB_PER_KG,
        }
    }

    pub fn display_weight(&self) -> String {
        match self.unit_preference {
            UnitPreference::Metric => format!("{:.1} kg", self.preferred_weight()),
            UnitPreference::Imperial => format!("{:.1} lb", self.preferred_weight()),
        }
    }
}

/// Editable fields of the pet profile page
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PetProfileUpdate {
    pub pet_name: String,
    pub species: Species,
    pub breed: String,
    pub age: i64,
    pub weight: f64,
    pub activity_level: ActivityLevel,
    pub nickname: Option<String>,
    pub feeding_schedule: Option<String>,
    pub training_goal: Option<String>,
    pub unit_preference: UnitPreference,
    pub allergies: Option<String>,
    pub favorite_foods: Option<String>,
}
