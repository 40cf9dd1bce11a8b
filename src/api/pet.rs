//! # Pet API Module
//!
//! Pet profiles and the active pet of a session. Every read is scoped by the
//! owner, a pet id of another user behaves like a missing pet.

use crate::{
    api, metric, models, repo,
    services::{self, live},
};

pub const MAX_PET_AGE: i64 = 30;
pub const MAX_PET_WEIGHT_KG: f64 = 100.0;

const LB_PER_KG: f64 = 2.204_622_6;

/// Lists the pets of the user in creation order
pub async fn get_user_pets(
    repo: &repo::ImplAppRepo,
    user_id: i64,
) -> anyhow::Result<Vec<models::pet::Pet>> {
    repo.get_all_pets_user_id(user_id).await
}

/// Gets one pet of the user.
///
/// # Errors
/// [api::RecordNotFound] when the pet does not exist or has another owner.
pub async fn get_pet(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<models::pet::Pet> {
    repo.get_pet_by_id(pet_id, user_id).await?.ok_or_else(|| {
        api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        }
        .into()
    })
}

/// Finds the pet the pages work on.
///
/// The pet stored in the session wins while the user still owns it, otherwise
/// the first pet of the user is used. `None` means the user has no pet yet
/// and must go through onboarding.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `user_id` - Owner of the pets
/// * `session_pet_id` - Pet selected in the session, if any
pub async fn resolve_active_pet(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    session_pet_id: Option<i64>,
) -> anyhow::Result<Option<models::pet::Pet>> {
    if let Some(pet_id) = session_pet_id
        && let Some(pet) = repo.get_pet_by_id(pet_id, user_id).await?
    {
        return Ok(Some(pet));
    }

    Ok(repo.get_all_pets_user_id(user_id).await?.into_iter().next())
}

/// Converts a weight typed in the pet's unit preference to kilograms
pub fn weight_to_kg(value: f64, unit: models::pet::UnitPreference) -> f64 {
    match unit {
        models::pet::UnitPreference::Metric => value,
        models::pet::UnitPreference::Imperial => value / LB_PER_KG,
    }
}

pub fn validate_pet_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        return Err(api::invalid_input("Pet name is required."));
    }
    Ok(())
}

pub fn validate_breed(breed: &str) -> anyhow::Result<()> {
    if breed.trim().is_empty() {
        return Err(api::invalid_input("Breed is required."));
    }
    Ok(())
}

pub fn validate_age(age: i64) -> anyhow::Result<()> {
    if !(0..=MAX_PET_AGE).contains(&age) {
        return Err(api::invalid_input("Age must be between 0 and 30 years."));
    }
    Ok(())
}

/// Weight in kilograms must be positive and at most 100
pub fn validate_weight(weight: f64) -> anyhow::Result<()> {
    if !weight.is_finite() || weight <= 0.0 || weight > MAX_PET_WEIGHT_KG {
        return Err(api::invalid_input(
            "Weight must be greater than 0 and at most 100 kg.",
        ));
    }
    Ok(())
}

/// Creates a pet for the user and returns its id
pub async fn create_pet(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    pet: &models::pet::Pet,
) -> anyhow::Result<i64> {
    let _span = logfire::span!("create_pet").entered();

    validate_pet_name(&pet.pet_name)?;
    validate_breed(&pet.breed)?;
    validate_age(pet.age)?;
    validate_weight(pet.weight)?;

    let pet_id = repo.insert_pet(pet).await?;

    live_feed.publish(pet.user_app_id, pet_id, live::Collection::Pets);
    metric::incr_record_write_statds("pets", "add");
    Ok(pet_id)
}

/// Updates the editable fields of the pet profile.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `live_feed` - Feed told about the change
/// * `user_id` - Owner of the pet
/// * `pet_id` - Pet to update
/// * `profile` - New values, weight already in kilograms
///
/// # Errors
/// [api::InvalidInput] on a rejected value, [api::RecordNotFound] when the
/// user does not own the pet.
pub async fn update_pet_profile(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    profile: &models::pet::PetProfileUpdate,
) -> anyhow::Result<models::pet::Pet> {
    validate_pet_name(&profile.pet_name)?;
    validate_breed(&profile.breed)?;
    validate_age(profile.age)?;
    validate_weight(profile.weight)?;

    if !repo.update_pet_profile(pet_id, user_id, profile).await? {
        return Err(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        }
        .into());
    }

    live_feed.publish(user_id, pet_id, live::Collection::Pets);
    metric::incr_record_write_statds("pets", "update");

    get_pet(repo, user_id, pet_id).await
}

/// Replaces the avatar of an owned pet, the image is stored before the pet
/// is updated.
///
/// # Errors
/// [api::InvalidInput] for a rejected image, [api::RecordNotFound] when the
/// user does not own the pet.
pub async fn update_pet_avatar(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    pic: models::Pic,
) -> anyhow::Result<String> {
    api::memory::validate_pic(&pic)?;
    get_pet(repo, user_id, pet_id).await?;

    let key = api::memory::avatar_storage_key(user_id, &pic.filename_extension);
    let avatar_url = api::memory::upload_pic(storage_service, &key, pic).await?;

    if !repo.update_pet_avatar(pet_id, user_id, &avatar_url).await? {
        return Err(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        }
        .into());
    }

    live_feed.publish(user_id, pet_id, live::Collection::Pets);
    metric::incr_record_write_statds("pets", "avatar");

    Ok(avatar_url)
}
