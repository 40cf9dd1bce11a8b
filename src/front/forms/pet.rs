use serde::Deserialize;

use crate::{api, api::onboarding::DraftField, models};

use super::{clean_optional, clean_text};

#[derive(Debug, Deserialize)]
pub struct PetProfileForm {
    pub pet_name: String,
    pub species: models::pet::Species,
    pub breed: String,
    pub age: i64,
    /// in the selected unit
    pub weight: f64,
    pub activity_level: models::pet::ActivityLevel,
    pub unit_preference: models::pet::UnitPreference,
    #[serde(default)]
    pub nickname: String,
    #[serde(default)]
    pub feeding_schedule: String,
    #[serde(default)]
    pub training_goal: String,
    #[serde(default)]
    pub allergies: String,
    #[serde(default)]
    pub favorite_foods: String,
}

impl From<PetProfileForm> for models::pet::PetProfileUpdate {
    fn from(val: PetProfileForm) -> Self {
        models::pet::PetProfileUpdate {
            pet_name: clean_text(val.pet_name.trim()),
            species: val.species,
            breed: clean_text(val.breed.trim()),
            age: val.age,
            weight: api::pet::weight_to_kg(val.weight, val.unit_preference),
            activity_level: val.activity_level,
            nickname: clean_optional(&val.nickname),
            feeding_schedule: clean_optional(&val.feeding_schedule),
            training_goal: clean_optional(&val.training_goal),
            unit_preference: val.unit_preference,
            allergies: clean_optional(&val.allergies),
            favorite_foods: clean_optional(&val.favorite_foods),
        }
    }
}

/// Fields posted by one onboarding step, only the ones of that step are present
#[derive(Debug, Default, Deserialize)]
pub struct OnboardingStepForm {
    pub pet_name: Option<String>,
    pub species: Option<models::pet::Species>,
    pub breed: Option<String>,
    pub age: Option<i64>,
    pub weight: Option<f64>,
    pub activity_level: Option<models::pet::ActivityLevel>,
}

impl OnboardingStepForm {
    pub fn into_fields(self) -> Vec<DraftField> {
        [
            self.pet_name
                .map(|name| DraftField::PetName(clean_text(&name))),
            self.species.map(DraftField::Species),
            self.breed
                .map(|breed| DraftField::Breed(clean_text(&breed))),
            self.age.map(DraftField::Age),
            self.weight.map(DraftField::Weight),
            self.activity_level.map(DraftField::ActivityLevel),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
