//! # Health API Module
//!
//! Health logs and reminders of a pet, with full create/update/delete, and the
//! overview shown on top of the health page.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::{
    api::{self, insights},
    metric, models, repo,
    services::live,
};

fn health_log_not_found(id: i64) -> anyhow::Error {
    api::RecordNotFound {
        collection: live::Collection::HealthLogs,
        id,
    }
    .into()
}

fn reminder_not_found(id: i64) -> anyhow::Error {
    api::RecordNotFound {
        collection: live::Collection::Reminders,
        id,
    }
    .into()
}

/// Trims the text fields and rejects an empty title or a non finite value
pub fn clean_health_log(
    log: models::health::HealthLogInput,
) -> anyhow::Result<models::health::HealthLogInput> {
    if log.title.trim().is_empty() {
        return Err(api::invalid_input("Title is required."));
    }

    if log.value.is_some_and(|value| !value.is_finite()) {
        return Err(api::invalid_input("Value must be a number."));
    }

    Ok(models::health::HealthLogInput {
        title: log.title.trim().to_string(),
        notes: log.notes.trim().to_string(),
        ..log
    })
}

/// Trims the text fields and rejects an empty name
pub fn clean_reminder(
    reminder: models::reminder::ReminderInput,
) -> anyhow::Result<models::reminder::ReminderInput> {
    if reminder.name.trim().is_empty() {
        return Err(api::invalid_input("Name is required."));
    }

    Ok(models::reminder::ReminderInput {
        name: reminder.name.trim().to_string(),
        notes: reminder.notes.trim().to_string(),
        ..reminder
    })
}

/// Health logs of the pet, newest event first
pub async fn get_health_logs(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<Vec<models::health::HealthLog>> {
    repo.get_health_logs(pet_id, user_id).await
}

pub async fn get_health_log(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
    log_id: i64,
) -> anyhow::Result<models::health::HealthLog> {
    repo.get_health_log(pet_id, user_id, log_id)
        .await?
        .ok_or_else(|| health_log_not_found(log_id))
}

/// Logs a health event of the pet.
///
/// # Arguments
/// * `repo` - Repository instance for database operations
/// * `live_feed` - Feed told about the new log
/// * `user_id` - Owner of the pet
/// * `pet_id` - Pet the event belongs to
/// * `log` - Event fields, `logged_at` is the date chosen by the user
pub async fn add_health_log(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    log: models::health::HealthLogInput,
) -> anyhow::Result<models::health::HealthLog> {
    let log = clean_health_log(log)?;

    let stored = repo
        .insert_health_log(pet_id, user_id, &log, Utc::now())
        .await?
        .ok_or(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        })?;

    live_feed.publish(user_id, pet_id, live::Collection::HealthLogs);
    metric::incr_record_write_statds("healthLogs", "add");
    Ok(stored)
}

/// Updates a health event.
///
/// # Errors
/// [api::RecordNotFound] when the log does not belong to the user's pet.
pub async fn update_health_log(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    log_id: i64,
    log: models::health::HealthLogInput,
) -> anyhow::Result<models::health::HealthLog> {
    let log = clean_health_log(log)?;

    let stored = repo
        .update_health_log(pet_id, user_id, log_id, &log)
        .await?
        .ok_or_else(|| health_log_not_found(log_id))?;

    live_feed.publish(user_id, pet_id, live::Collection::HealthLogs);
    metric::incr_record_write_statds("healthLogs", "update");
    Ok(stored)
}

/// Deletes a health event.
///
/// # Errors
/// [api::RecordNotFound] when the log does not belong to the user's pet.
pub async fn delete_health_log(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    log_id: i64,
) -> anyhow::Result<()> {
    if !repo.delete_health_log(pet_id, user_id, log_id).await? {
        return Err(health_log_not_found(log_id));
    }

    live_feed.publish(user_id, pet_id, live::Collection::HealthLogs);
    metric::incr_record_write_statds("healthLogs", "delete");
    Ok(())
}

/// Reminders of the pet, soonest due first
pub async fn get_reminders(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
) -> anyhow::Result<Vec<models::reminder::Reminder>> {
    repo.get_reminders(pet_id, user_id).await
}

pub async fn get_reminder(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
    reminder_id: i64,
) -> anyhow::Result<models::reminder::Reminder> {
    repo.get_reminder(pet_id, user_id, reminder_id)
        .await?
        .ok_or_else(|| reminder_not_found(reminder_id))
}

pub async fn add_reminder(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    reminder: models::reminder::ReminderInput,
) -> anyhow::Result<models::reminder::Reminder> {
    let reminder = clean_reminder(reminder)?;

    let stored = repo
        .insert_reminder(pet_id, user_id, &reminder, Utc::now())
        .await?
        .ok_or(api::RecordNotFound {
            collection: live::Collection::Pets,
            id: pet_id,
        })?;

    live_feed.publish(user_id, pet_id, live::Collection::Reminders);
    metric::incr_record_write_statds("reminders", "add");
    Ok(stored)
}

pub async fn update_reminder(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    reminder_id: i64,
    reminder: models::reminder::ReminderInput,
) -> anyhow::Result<models::reminder::Reminder> {
    let reminder = clean_reminder(reminder)?;

    let stored = repo
        .update_reminder(pet_id, user_id, reminder_id, &reminder)
        .await?
        .ok_or_else(|| reminder_not_found(reminder_id))?;

    live_feed.publish(user_id, pet_id, live::Collection::Reminders);
    metric::incr_record_write_statds("reminders", "update");
    Ok(stored)
}

pub async fn delete_reminder(
    repo: &repo::ImplAppRepo,
    live_feed: &live::LiveFeed,
    user_id: i64,
    pet_id: i64,
    reminder_id: i64,
) -> anyhow::Result<()> {
    if !repo.delete_reminder(pet_id, user_id, reminder_id).await? {
        return Err(reminder_not_found(reminder_id));
    }

    live_feed.publish(user_id, pet_id, live::Collection::Reminders);
    metric::incr_record_write_statds("reminders", "delete");
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct ReminderView {
    pub reminder: models::reminder::Reminder,
    pub is_overdue: bool,
}

/// Reminders with their overdue flag at `now`
pub fn reminder_views(
    reminders: Vec<models::reminder::Reminder>,
    now: &DateTime<Tz>,
) -> Vec<ReminderView> {
    reminders
        .into_iter()
        .map(|reminder| ReminderView {
            is_overdue: insights::is_reminder_overdue(&reminder, now),
            reminder,
        })
        .collect()
}

#[derive(Debug, Serialize)]
pub struct HealthOverview {
    pub score: u8,
    pub show_encouragement: bool,
    pub weight_trend: Vec<insights::WeightPoint>,
    pub show_weight_chart: bool,
    pub last_vet_visit: Option<DateTime<Utc>>,
    pub last_weight: Option<f64>,
}

/// Health score, weight trend and latest records of the pet
pub async fn get_health_overview(
    repo: &repo::ImplAppRepo,
    user_id: i64,
    pet_id: i64,
    now: &DateTime<Tz>,
) -> anyhow::Result<HealthOverview> {
    let logs = repo.get_health_logs(pet_id, user_id).await?;
    Ok(build_health_overview(&logs, now))
}

pub fn build_health_overview(
    logs: &[models::health::HealthLog],
    now: &DateTime<Tz>,
) -> HealthOverview {
    let score = insights::health_score(logs, now);
    let weight_trend = insights::weight_trend(logs);

    HealthOverview {
        score,
        show_encouragement: insights::shows_health_encouragement(score),
        show_weight_chart: insights::can_chart_weight(&weight_trend),
        last_vet_visit: logs
            .iter()
            .filter(|log| log.log_type == models::health::HealthLogType::VetVisit)
            .map(|log| log.logged_at)
            .max(),
        last_weight: weight_trend.last().map(|point| point.value),
        weight_trend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockAppRepo;
    use chrono::{NaiveDate, TimeDelta, TimeZone};
    use mockall::predicate::*;

    fn log_input(title: &str, value: Option<f64>) -> models::health::HealthLogInput {
        models::health::HealthLogInput {
            log_type: models::health::HealthLogType::Weight,
            title: title.to_string(),
            notes: " after walk ".into(),
            value,
            logged_at: Utc::now(),
        }
    }

    fn stored_log(
        id: i64,
        pet_id: i64,
        input: &models::health::HealthLogInput,
    ) -> models::health::HealthLog {
        models::health::HealthLog {
            id,
            pet_id,
            log_type: input.log_type,
            title: input.title.clone(),
            notes: input.notes.clone(),
            value: input.value,
            logged_at: input.logged_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn reminder_input(name: &str) -> models::reminder::ReminderInput {
        models::reminder::ReminderInput {
            reminder_type: models::reminder::ReminderType::Appointment,
            name: name.to_string(),
            due_date: NaiveDate::from_ymd_opt(2026, 10, 20).unwrap(),
            notes: String::new(),
        }
    }

    #[test]
    fn test_clean_health_log() {
        let cleaned = clean_health_log(log_input("  Weigh in ", Some(30.0))).unwrap();
        assert_eq!(cleaned.title, "Weigh in");
        assert_eq!(cleaned.notes, "after walk");

        assert!(clean_health_log(log_input("   ", None)).is_err());
        assert!(clean_health_log(log_input("Weigh in", Some(f64::INFINITY))).is_err());
    }

    #[ntex::test]
    async fn test_add_health_log() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_insert_health_log()
            .with(eq(2), eq(1), always(), always())
            .times(1)
            .returning(|pet_id, _, log, _| Ok(Some(stored_log(5, pet_id, log))));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);
        let mut receiver = live_feed.subscribe();

        let stored = add_health_log(&mock_repo, &live_feed, 1, 2, log_input("Weigh in", Some(30.0)))
            .await
            .unwrap();

        assert_eq!(stored.value, Some(30.0));
        assert_eq!(
            receiver.try_recv().unwrap().collection,
            live::Collection::HealthLogs
        );
    }

    #[ntex::test]
    async fn test_update_health_log_not_owned() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_update_health_log()
            .with(eq(2), eq(1), eq(8), always())
            .times(1)
            .returning(|_, _, _, _| Ok(None));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);
        let mut receiver = live_feed.subscribe();

        let err = update_health_log(&mock_repo, &live_feed, 1, 2, 8, log_input("Vet", None))
            .await
            .unwrap_err();

        assert_eq!(
            err.downcast_ref::<api::RecordNotFound>(),
            Some(&api::RecordNotFound {
                collection: live::Collection::HealthLogs,
                id: 8
            })
        );
        assert!(receiver.try_recv().is_err());
    }

    #[ntex::test]
    async fn test_delete_health_log() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_health_log()
            .returning(|_, _, log_id| Ok(log_id == 8));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);

        assert!(
            delete_health_log(&mock_repo, &live_feed, 1, 2, 8)
                .await
                .is_ok()
        );
        assert!(
            delete_health_log(&mock_repo, &live_feed, 1, 2, 9)
                .await
                .unwrap_err()
                .downcast_ref::<api::RecordNotFound>()
                .is_some()
        );
    }

    #[ntex::test]
    async fn test_add_reminder_requires_name() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo.expect_insert_reminder().never();
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);

        let err = add_reminder(&mock_repo, &live_feed, 1, 2, reminder_input(" "))
            .await
            .unwrap_err();

        assert!(err.downcast_ref::<api::InvalidInput>().is_some());
    }

    #[ntex::test]
    async fn test_delete_reminder_publishes_change() {
        let mut mock_repo = MockAppRepo::new();
        mock_repo
            .expect_delete_reminder()
            .with(eq(2), eq(1), eq(4))
            .times(1)
            .returning(|_, _, _| Ok(true));
        let mock_repo: repo::ImplAppRepo = Box::new(mock_repo);
        let live_feed = live::LiveFeed::new(4);
        let mut receiver = live_feed.subscribe();

        delete_reminder(&mock_repo, &live_feed, 1, 2, 4)
            .await
            .unwrap();

        assert_eq!(
            receiver.try_recv().unwrap().collection,
            live::Collection::Reminders
        );
    }

    #[test]
    fn test_reminder_views_flag_overdue() {
        let now = chrono_tz::UTC
            .with_ymd_and_hms(2026, 10, 20, 8, 0, 0)
            .unwrap();
        let reminder = |id, due_date| models::reminder::Reminder {
            id,
            pet_id: 2,
            reminder_type: models::reminder::ReminderType::Grooming,
            name: "Bath".into(),
            due_date,
            notes: String::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let views = reminder_views(
            vec![
                reminder(1, NaiveDate::from_ymd_opt(2026, 10, 20).unwrap()),
                reminder(2, NaiveDate::from_ymd_opt(2026, 10, 21).unwrap()),
            ],
            &now,
        );

        assert!(views[0].is_overdue);
        assert!(!views[1].is_overdue);
    }

    #[test]
    fn test_build_health_overview() {
        let now = chrono_tz::UTC
            .with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
            .unwrap();
        let at = |days: i64| now.with_timezone(&Utc) - TimeDelta::days(days);
        let logs: Vec<_> = [
            (models::health::HealthLogType::Weight, at(1), Some(30.0)),
            (models::health::HealthLogType::VetVisit, at(20), None),
            (models::health::HealthLogType::Weight, at(40), Some(29.0)),
        ]
        .into_iter()
        .enumerate()
        .map(|(id, (log_type, logged_at, value))| {
            stored_log(
                id as i64,
                2,
                &models::health::HealthLogInput {
                    log_type,
                    title: "event".into(),
                    notes: String::new(),
                    value,
                    logged_at,
                },
            )
        })
        .collect();

        let overview = build_health_overview(&logs, &now);

        assert_eq!(overview.score, 100);
        assert!(overview.show_encouragement);
        assert!(overview.show_weight_chart);
        assert_eq!(overview.last_weight, Some(30.0));
        assert_eq!(overview.last_vet_visit, Some(at(20)));
    }
}
