use crate::models;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use super::{AppRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

#[async_trait]
impl AppRepo for SqlxSqliteRepo {
    async fn get_user_app_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(sqlite_queries::QUERY_GET_USER_APP_BY_EMAIL)
                .bind(email)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_user_app_by_id(
        &self,
        user_id: i64,
    ) -> anyhow::Result<Option<models::user_app::User>> {
        Ok(
            sqlx::query_as::<_, models::user_app::User>(sqlite_queries::QUERY_GET_USER_APP_BY_ID)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn insert_user_app(&self, app_user: &models::user_app::User) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_USER_APP)
            .bind(&app_user.email)
            .bind(&app_user.password_hash)
            .bind(app_user.auth_provider.clone())
            .bind(app_user.is_enabled)
            .bind(app_user.created_at)
            .bind(app_user.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn delete_user_app(&self, user_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_USER_APP)
            .bind(user_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn insert_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(pet.user_app_id)
            .bind(&pet.pet_name)
            .bind(pet.species)
            .bind(&pet.breed)
            .bind(pet.age)
            .bind(pet.weight)
            .bind(pet.activity_level)
            .bind(&pet.avatar_url)
            .bind(&pet.nickname)
            .bind(&pet.feeding_schedule)
            .bind(&pet.training_goal)
            .bind(pet.unit_preference)
            .bind(&pet.allergies)
            .bind(&pet.favorite_foods)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn get_all_pets_user_id(&self, user_id: i64) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS_USER_ID)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_by_id(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Option<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id)
                .bind(user_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_pet_profile(
        &self,
        pet_id: i64,
        user_id: i64,
        profile: &models::pet::PetProfileUpdate,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_UPDATE_PET_PROFILE)
            .bind(pet_id)
            .bind(user_id)
            .bind(&profile.pet_name)
            .bind(&profile.breed)
            .bind(profile.age)
            .bind(profile.weight)
            .bind(profile.activity_level)
            .bind(&profile.nickname)
            .bind(&profile.feeding_schedule)
            .bind(&profile.training_goal)
            .bind(profile.unit_preference)
            .bind(&profile.allergies)
            .bind(&profile.favorite_foods)
            .bind(Utc::now())
            .bind(profile.species)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_pet_avatar(
        &self,
        pet_id: i64,
        user_id: i64,
        avatar_url: &str,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_UPDATE_PET_AVATAR)
            .bind(pet_id)
            .bind(user_id)
            .bind(avatar_url)
            .bind(Utc::now())
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_activity_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::activity::NewActivityLog,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::activity::ActivityLog>> {
        Ok(sqlx::query_as::<_, models::activity::ActivityLog>(
            sqlite_queries::QUERY_INSERT_ACTIVITY_LOG,
        )
        .bind(pet_id)
        .bind(user_id)
        .bind(log.activity_type)
        .bind(log.duration_minutes)
        .bind(&log.notes)
        .bind(created_at)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn get_activity_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::activity::ActivityLog>> {
        Ok(sqlx::query_as::<_, models::activity::ActivityLog>(
            sqlite_queries::QUERY_GET_ACTIVITY_LOGS,
        )
        .bind(pet_id)
        .bind(user_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn insert_feeding_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::feeding::NewFeedingLog,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::feeding::FeedingLog>> {
        Ok(sqlx::query_as::<_, models::feeding::FeedingLog>(
            sqlite_queries::QUERY_INSERT_FEEDING_LOG,
        )
        .bind(pet_id)
        .bind(user_id)
        .bind(log.food_type)
        .bind(&log.quantity)
        .bind(&log.notes)
        .bind(log.reaction)
        .bind(created_at)
        .fetch_optional(&self.db_pool)
        .await?)
    }

    async fn get_feeding_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::feeding::FeedingLog>> {
        Ok(
            sqlx::query_as::<_, models::feeding::FeedingLog>(sqlite_queries::QUERY_GET_FEEDING_LOGS)
                .bind(pet_id)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn insert_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log: &models::health::HealthLogInput,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::health::HealthLog>> {
        Ok(
            sqlx::query_as::<_, models::health::HealthLog>(sqlite_queries::QUERY_INSERT_HEALTH_LOG)
                .bind(pet_id)
                .bind(user_id)
                .bind(log.log_type)
                .bind(&log.title)
                .bind(&log.notes)
                .bind(log.value)
                .bind(log.logged_at)
                .bind(created_at)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_health_logs(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::health::HealthLog>> {
        Ok(
            sqlx::query_as::<_, models::health::HealthLog>(sqlite_queries::QUERY_GET_HEALTH_LOGS)
                .bind(pet_id)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log_id: i64,
    ) -> anyhow::Result<Option<models::health::HealthLog>> {
        Ok(
            sqlx::query_as::<_, models::health::HealthLog>(sqlite_queries::QUERY_GET_HEALTH_LOG)
                .bind(pet_id)
                .bind(user_id)
                .bind(log_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log_id: i64,
        log: &models::health::HealthLogInput,
    ) -> anyhow::Result<Option<models::health::HealthLog>> {
        Ok(
            sqlx::query_as::<_, models::health::HealthLog>(sqlite_queries::QUERY_UPDATE_HEALTH_LOG)
                .bind(pet_id)
                .bind(user_id)
                .bind(log_id)
                .bind(log.log_type)
                .bind(&log.title)
                .bind(&log.notes)
                .bind(log.value)
                .bind(log.logged_at)
                .bind(Utc::now())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn delete_health_log(
        &self,
        pet_id: i64,
        user_id: i64,
        log_id: i64,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_HEALTH_LOG)
            .bind(pet_id)
            .bind(user_id)
            .bind(log_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder: &models::reminder::ReminderInput,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::reminder::Reminder>> {
        Ok(
            sqlx::query_as::<_, models::reminder::Reminder>(sqlite_queries::QUERY_INSERT_REMINDER)
                .bind(pet_id)
                .bind(user_id)
                .bind(reminder.reminder_type)
                .bind(&reminder.name)
                .bind(reminder.due_date)
                .bind(&reminder.notes)
                .bind(created_at)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_reminders(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::reminder::Reminder>> {
        Ok(
            sqlx::query_as::<_, models::reminder::Reminder>(sqlite_queries::QUERY_GET_REMINDERS)
                .bind(pet_id)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
    ) -> anyhow::Result<Option<models::reminder::Reminder>> {
        Ok(
            sqlx::query_as::<_, models::reminder::Reminder>(sqlite_queries::QUERY_GET_REMINDER)
                .bind(pet_id)
                .bind(user_id)
                .bind(reminder_id)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn update_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
        reminder: &models::reminder::ReminderInput,
    ) -> anyhow::Result<Option<models::reminder::Reminder>> {
        Ok(
            sqlx::query_as::<_, models::reminder::Reminder>(sqlite_queries::QUERY_UPDATE_REMINDER)
                .bind(pet_id)
                .bind(user_id)
                .bind(reminder_id)
                .bind(reminder.reminder_type)
                .bind(&reminder.name)
                .bind(reminder.due_date)
                .bind(&reminder.notes)
                .bind(Utc::now())
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn delete_reminder(
        &self,
        pet_id: i64,
        user_id: i64,
        reminder_id: i64,
    ) -> anyhow::Result<bool> {
        let result = sqlx::query(sqlite_queries::QUERY_DELETE_REMINDER)
            .bind(pet_id)
            .bind(user_id)
            .bind(reminder_id)
            .execute(&self.db_pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_memory(
        &self,
        pet_id: i64,
        user_id: i64,
        memory: &models::memory::NewMemory,
        created_at: DateTime<Utc>,
    ) -> anyhow::Result<Option<models::memory::Memory>> {
        Ok(
            sqlx::query_as::<_, models::memory::Memory>(sqlite_queries::QUERY_INSERT_MEMORY)
                .bind(pet_id)
                .bind(user_id)
                .bind(&memory.image_url)
                .bind(&memory.caption)
                .bind(&memory.ai_hint)
                .bind(created_at)
                .fetch_optional(&self.db_pool)
                .await?,
        )
    }

    async fn get_memories(
        &self,
        pet_id: i64,
        user_id: i64,
    ) -> anyhow::Result<Vec<models::memory::Memory>> {
        Ok(
            sqlx::query_as::<_, models::memory::Memory>(sqlite_queries::QUERY_GET_MEMORIES)
                .bind(pet_id)
                .bind(user_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }
}
