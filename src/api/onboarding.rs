//! # Onboarding API Module
//!
//! Wizard creating the first (or another) pet. The draft travels in the
//! session between requests; nothing is stored until it is submitted.

use chrono::Utc;
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::{
    api, consts, models, repo,
    services::{self, live},
};

pub const LAST_STEP: usize = 7;

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OnboardingStep {
    #[display("Welcome")]
    Welcome,
    #[display("What's your pet's name?")]
    Name,
    #[display("What kind of pet is {{name}}?")]
    Species,
    #[display("Tell us more about {{name}}")]
    Details,
    #[display("How much does {{name}} weigh?")]
    Weight,
    #[display("What's {{name}}'s energy level?")]
    Energy,
    #[display("Upload a photo of {{name}}")]
    Avatar,
    #[display("Ready to meet {{name}}?")]
    Review,
}

impl OnboardingStep {
    pub const ALL: [Self; LAST_STEP + 1] = [
        Self::Welcome,
        Self::Name,
        Self::Species,
        Self::Details,
        Self::Weight,
        Self::Energy,
        Self::Avatar,
        Self::Review,
    ];

    pub fn from_cursor(cursor: usize) -> Self {
        Self::ALL[cursor.min(LAST_STEP)]
    }

    /// Step heading with the pet name filled in
    pub fn title(&self, pet_name: &str) -> String {
        self.to_string().replace("{name}", pet_name)
    }
}

/// One field typed in a wizard step
#[derive(Debug, Clone, PartialEq)]
pub enum DraftField {
    PetName(String),
    Species(models::pet::Species),
    Breed(String),
    Age(i64),
    Weight(f64),
    ActivityLevel(models::pet::ActivityLevel),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OnboardingDraft {
    pub cursor: usize,
    pub pet_name: String,
    pub species: models::pet::Species,
    pub breed: String,
    pub age: i64,
    pub weight: f64,
    pub activity_level: models::pet::ActivityLevel,
    pub avatar_url: String,
}

impl Default for OnboardingDraft {
    fn default() -> Self {
        Self {
            cursor: 0,
            pet_name: "Buddy".into(),
            species: models::pet::Species::Dog,
            breed: "Golden Retriever".into(),
            age: 5,
            weight: 30.0,
            activity_level: models::pet::ActivityLevel::Playful,
            avatar_url: consts::DEFAULT_AVATAR_URL.into(),
        }
    }
}

impl OnboardingDraft {
    pub fn step(&self) -> OnboardingStep {
        OnboardingStep::from_cursor(self.cursor)
    }

    pub fn next(&mut self) {
        self.cursor = (self.cursor + 1).min(LAST_STEP);
    }

    pub fn prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn progress_percentage(&self) -> u8 {
        (self.cursor.min(LAST_STEP) * 100 / LAST_STEP) as u8
    }

    /// Sets a field after validating it, the draft is unchanged on error
    pub fn apply(&mut self, field: DraftField) -> anyhow::Result<()> {
        match field {
            DraftField::PetName(name) => {
                api::pet::validate_pet_name(&name)?;
                self.pet_name = name.trim().to_string();
            }
            DraftField::Species(species) => self.species = species,
            DraftField::Breed(breed) => {
                api::pet::validate_breed(&breed)?;
                self.breed = breed.trim().to_string();
            }
            DraftField::Age(age) => {
                api::pet::validate_age(age)?;
                self.age = age;
            }
            DraftField::Weight(weight) => {
                api::pet::validate_weight(weight)?;
                self.weight = weight;
            }
            DraftField::ActivityLevel(level) => self.activity_level = level,
        }

        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        api::pet::validate_pet_name(&self.pet_name)?;
        api::pet::validate_breed(&self.breed)?;
        api::pet::validate_age(self.age)?;
        api::pet::validate_weight(self.weight)
    }

    pub fn to_pet(&self, user_id: i64) -> models::pet::Pet {
        let now = Utc::now();
        models::pet::Pet {
            id: 0,
            user_app_id: user_id,
            pet_name: self.pet_name.clone(),
            species: self.species,
            breed: self.breed.clone(),
            age: self.age,
            weight: self.weight,
            activity_level: self.activity_level,
            avatar_url: self.avatar_url.clone(),
            created_at: now,
            updated_at: now,
            ..Default::default()
        }
    }
}

/// Stores the avatar right away and keeps its url in the draft
pub async fn upload_avatar(
    storage_service: &services::ImplStorageService,
    user_id: i64,
    draft: &mut OnboardingDraft,
    pic: models::Pic,
) -> anyhow::Result<()> {
    let key = api::memory::avatar_storage_key(user_id, &pic.filename_extension);
    draft.avatar_url = api::memory::upload_pic(storage_service, &key, pic).await?;

    Ok(())
}

/// Creates the pet out of a complete draft.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `live_feed` - Feed told about the new pet
/// * `user_id` - Owner of the new pet
/// * `draft` - Wizard values
///
/// # Returns
/// * `anyhow::Result<i64>` - Id of the new pet, it becomes the active pet
pub async fn submit(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    draft: &OnboardingDraft,
) -> anyhow::Result<i64> {
    draft.validate()?;

    api::pet::create_pet(repo, live_feed, &draft.to_pet(user_id)).await
}
