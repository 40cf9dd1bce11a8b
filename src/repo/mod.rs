pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Storage of users, pets and every per-pet record.
///
/// Every pet scoped operation receives both `pet_id` and `user_id`; a record
/// is only reached when the pet belongs to that user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AppRepo {
    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>>;

    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64>;

    /// Removes the user, the cascade removes pets and records
    async fn delete_user_app(&self, user_id: i64) -> anyhow::Result<()>;

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pet_by_id(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<models::pet::Pet>>;

    /// Returns false when no pet of the user matched
    async fn update_pet_profile(
        &self,
        pet_id: i64,
        user_id: i64,
        profile: &models::pet::PetProfileUpdate,
    ) -> anyhow::Result<bool>;

    /// Returns false when no pet of the user matched
    async fn update_pet_avatar(
        &self,
        pet_id: i64,
        user_id: i64,
        avatar_url: &str,
    ) -> anyhow::Result<bool>;

    async fn insert_activity_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::activity::NewActivityLog,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::activity::ActivityLog>>;

    async fn get_activity_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::activity::ActivityLog>>;

    async fn insert_feeding_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::feeding::NewFeedingLog,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::feeding::FeedingLog>>;

    async fn get_feeding_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::feeding::FeedingLog>>;

    async fn insert_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::health::HealthLogInput,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::health::HealthLog>>;

    async fn get_health_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::health::HealthLog>>;

    async fn get_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log_id: i64,
    ) -> anyhow::Result<Option<models::health::HealthLog>>;

    async fn update_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log_id: i64,
        log: &models::health::HealthLogInput,
    ) -> anyhow::Result<Option<models::health::HealthLog>>;

    /// Returns false when nothing was deleted
    async fn delete_health_log(&self, pet_id: i64, user_id: i64, log_id: i64)
    -> anyhow::Result<bool>;

    async fn insert_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder: &models::reminder::ReminderInput,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::reminder::Reminder>>;

    async fn get_reminders(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::reminder::Reminder>>;

    async fn get_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
    ) -> anyhow::Result<Option<models::reminder::Reminder>>;

    async fn update_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
        reminder: &models::reminder::ReminderInput,
    ) -> anyhow::Result<Option<models::reminder::Reminder>>;

    /// Returns false when nothing was deleted
    async fn delete_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
    ) -> anyhow::Result<bool>;

    async fn insert_memory(
        &self,
        pet_id: i64,
        user_id: i64,
        memory: &models::memory::NewMemory,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::memory::Memory>>;

    async fn get_memories(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::memory::Memory>>;
}

pub type ImplAppRepo = Box<dyn AppRepo>;
