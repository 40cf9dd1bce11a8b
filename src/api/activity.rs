//! # Activity API Module
//!
//! Create-only activity logs. The creation time is assigned here, never taken
//! from the user input.

use chrono::Utc;

use crate::{api, consts, metric, models, repo, services::live};

pub fn validate_activity_log(log: &models::activity::NewActivityLog) -> anyhow::Result<()> {
    if !(1..=consts::MAX_ACTIVITY_MINUTES).contains(&log.duration_minutes) {
        return Err(api::invalid_input(&format!(
            "Duration must be between 1 and {} minutes.",
            consts::MAX_ACTIVITY_MINUTES
        )));
    }
    Ok(())
}

/// Adds an activity to the pet and tells the live pages about it.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `live_feed` - Feed told about the new log
/// * `user_id` - Owner of the pet
/// * `pet_id` - Pet the activity belongs to
/// * `log` - Activity type, duration and notes
///
/// # Returns
/// * `anyhow::Result<models::activity::ActivityLog>` - The stored log
pub async fn add_activity_log(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    log: models::activity::NewActivityLog,
) -> anyhow::Result<models::activity::ActivityLog> {
    validate_activity_log(&log)?;

    let log = models::activity::NewActivityLog {
        notes: api::non_blank(log.notes.as_deref()),
        ..log
    };

    let stored = repo
        .insert_activity_log(pet_id, user_id, &log, Utc::now())
        .await?
        .ok_or(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        })?;

    live_feed.publish(user_id, pet_id, live::Collection::ActivityLogs);
    metric::incr_record_write_statds("activityLogs", "add");
    Ok(stored)
}

/// Activity logs of the pet, newest first
pub async fn get_activity_logs(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<Vec<models::activity::ActivityLog>> {
    repo.get_activity_logs(pet_id, user_id).await
}
