//! # Memory API Module
//!
//! Photo memories. The image goes to the storage first, the memory then keeps
//! the url it is served from.

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    api, consts, metric, models, repo,
    services::{self, live},
};

/// Rejects empty, oversized and not accepted images
pub fn validate_pic(pic: &models::Pic) -> anyhow::Result<()> {
    if pic.body.is_empty() {
        return Err(api::invalid_input("Please choose an image."));
    }

    if pic.body.len() > consts::PIC_MAX_SIZE_BYTES {
        return Err(api::invalid_input("Image must be at most 6 MB."));
    }

    if !consts::ACCEPTED_IMAGE_EXTENSIONS.contains(&pic.filename_extension.as_str()) {
        return Err(api::invalid_input(
            "Image must be a png, jpeg, jpg or heic file.",
        ));
    }

    Ok(())
}

pub fn memory_storage_key(user_id: i64, filename_extension: &str) -> String {
    format!(
        "{}memories/{}.{}",
        services::user_storage_prefix(user_id),
        Uuid::new_v4(),
        filename_extension
    )
}

pub fn avatar_storage_key(user_id: i64, filename_extension: &str) -> String {
    format!(
        "{}avatars/{}.{}",
        services::user_storage_prefix(user_id),
        Uuid::new_v4(),
        filename_extension
    )
}

/// Url the stored file is served back from
pub fn media_url(key: &str) -> String {
    format!("/media/{key}")
}

/// Validates and stores an image, returning the url it is served from
pub async fn upload_pic(
    storage_service: &services::ImplStorageService,
    key: &str,
    pic: models::Pic,
) -> anyhow::Result<String> {
    validate_pic(&pic)?;

    let content_type = pic.content_type();
    storage_service
        .save_file(key, pic.body, &content_type)
        .await?;

    Ok(media_url(key))
}

#[derive(Debug)]
pub struct MemoryUpload {
    pub pic: models::Pic,
    pub caption: String,
    pub ai_hint: Option<String>,
}

/// Uploads the image and saves the memory of the pet.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `storage_service` - Storage receiving the image
/// * `live_feed` - Feed told about the new memory
/// * `user_id` - Owner of the pet
/// * `pet_id` - Pet the memory belongs to
/// * `upload` - Image, caption and optional hint describing the image
///
/// # Errors
/// [api::InvalidInput] for a rejected image or empty caption,
/// [api::RecordNotFound] when the user does not own the pet.
pub async fn add_memory(
    repo: &repo::ImplAppRepo,
    storage_service: &services::ImplStorageService,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    upload: MemoryUpload,
) -> anyhow::Result<models::memory::Memory> {
    let _span = logfire::span!("add_memory").entered();

    let caption = upload.caption.trim().to_string();
    if caption.is_empty() {
        return Err(api::invalid_input("Caption is required."));
    }
    validate_pic(&upload.pic)?;

    // the image is only stored for an owned pet
    api::pet::get_pet(repo, user_id, pet_id).await?;

    let key = memory_storage_key(user_id, &upload.pic.filename_extension);
    let image_url = upload_pic(storage_service, &key, upload.pic).await?;

    let memory = models::memory::NewMemory {
        image_url,
        caption,
        ai_hint: api::non_blank(upload.ai_hint.as_deref()),
    };

    let stored = repo
        .insert_memory(pet_id, user_id, &memory, Utc::now())
        .await?
        .ok_or(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        })?;

    live_feed.publish(user_id, pet_id, live::Collection::Memories);
    metric::incr_record_write_statds("memories", "add");
    Ok(stored)
}

/// Memories of the pet, newest first
pub async fn get_memories(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<Vec<models::memory::Memory>> {
    repo.get_memories(pet_id, user_id).await
}

#[derive(Debug, Serialize, PartialEq)]
pub struct MemoryGallery {
    pub featured: Option<models::memory::Memory>,
    pub others: Vec<models::memory::Memory>,
}

/// The newest memory is featured, the rest fill the grid
pub fn build_gallery(memories: Vec<models::memory::Memory>) -> MemoryGallery {
    let mut memories = memories.into_iter();

    MemoryGallery {
        featured: memories.next(),
        others: memories.collect(),
    }
}
