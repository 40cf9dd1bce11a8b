//! # Feeding API Module
//!
//! Create-only feeding logs, timestamped on insert.

use chrono::Utc;

use crate::{api, metric, models, repo, services::live};

pub fn validate_feeding_log(log: &models::feeding::NewFeedingLog) -> anyhow::Result<()> {
    if log.quantity.trim().is_empty() {
        return Err(api::invalid_input("Quantity is required."));
    }
    Ok(())
}

/// Adds a meal to the pet and tells the live pages about it.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `live_feed` - Feed told about the new log
/// * `user_id` - Owner of the pet
/// * `pet_id` - Pet the meal belongs to
/// * `log` - Food type, quantity, notes and reaction
pub async fn add_feeding_log(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    log: models::feeding::NewFeedingLog,
) -> anyhow::Result<models::feeding::FeedingLog> {
    validate_feeding_log(&log)?;

    let log = models::feeding::NewFeedingLog {
        quantity: log.quantity.trim().to_string(),
        notes: api::non_blank(log.notes.as_deref()),
        ..log
    };

    let stored = repo
        .insert_feeding_log(pet_id, user_id, &log, Utc::now())
        .await?
        .ok_or(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        })?;

    live_feed.publish(user_id, pet_id, live::Collection::FeedingLogs);
    metric::incr_record_write_statds("feedingLogs", "add");
    Ok(stored)
}

/// Feeding logs of the pet, newest first
pub async fn get_feeding_logs(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<Vec<models::feeding::FeedingLog>> {
    repo.get_feeding_logs(pet_id, user_id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;

    fn new_log(quantity: &str) -> models::feeding::NewFeedingLog {
        models::feeding::NewFeedingLog {
            food_type: models::feeding::FoodType::Treat,
            quantity: quantity.to_string(),
            notes: None,
            reaction: Some(models::feeding::FoodReaction::Loved),
        }
    }

    #[ntex::test]
    async fn test_add_feeding_log() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_feeding_log()
            .withf(|pet_id, user_id, log, _| {
                *pet_id == 2 && *user_id == 1 && log.quantity == "2 biscuits"
            })
            .times(1)
            .returning(|pet_id, _, log, created_at| {
                Ok(Some(models::feeding::FeedingLog {
                    id: 1,
                    pet_id,
                    food_type: log.food_type,
                    quantity: log.quantity.clone(),
                    notes: log.notes.clone(),
                    reaction: log.reaction,
                    created_at,
                }))
            });
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);
        let mut receiver = live_feed.subscribe();

        let stored = add_feeding_log(&mock_repo, &live_feed, 1, 2, new_log(" 2 biscuits "))
            .await
            .unwrap();

        assert_eq!(stored.reaction, Some(models::feeding::FoodReaction::Loved));
        assert_eq!(
            receiver.try_recv().unwrap().collection,
            live::Collection::FeedingLogs
        );
    }

    #[ntex::test]
    async fn test_add_feeding_log_requires_quantity() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_feeding_log().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);

        let err = add_feeding_log(&mock_repo, &live_feed, 1, 2, new_log("  "))
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<api::InvalidInput>().is_some());
    }
}
