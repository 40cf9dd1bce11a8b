use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodType {
    #[default]
    #[display("Kibble")]
    Kibble,
    #[display("Wet Food")]
    WetFood,
    #[display("Treat")]
    Treat,
    #[display("Other")]
    Other,
}

impl FoodType {
    pub const ALL: [Self; 4] = [Self::Kibble, Self::WetFood, Self::Treat, Self::Other];
}

#[derive(Debug, Display, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FoodReaction {
    #[display("Loved it")]
    Loved,
    #[display("Ate some")]
    AteSome,
    #[display("Refused")]
    Refused,
}

impl FoodReaction {
    pub const ALL: [Self; 3] = [Self::Loved, Self::AteSome, Self::Refused];
}

#[derive(Debug, Clone, Serialize, PartialEq, sqlx::FromRow)]
pub struct FeedingLog {
    pub id: i64,
    pub pet_id: i64,
    pub food_type: FoodType,
    pub quantity: String,
    pub notes: Option<String>,
    pub reaction: Option<FoodReaction>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewFeedingLog {
    pub food_type: FoodType,
    pub quantity: String,
    pub notes: Option<String>,
    pub reaction: Option<FoodReaction>,
}
