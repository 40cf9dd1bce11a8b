pub mod care_tips;
pub mod live;
pub mod storage;

use crate::api;
use async_trait::async_trait;

/// Blob storage for avatars and memories, keys look like `users/{user_id}/...`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageService {
    async fn save_file(&self, key: &str, body: Vec<u8>, content_type: &str)
    -> anyhow::Result<()>;

    async fn get_file(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Removes every file stored under the user prefix
    async fn delete_user_files(&self, user_id: i64) -> anyhow::Result<()>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CareTipsService {
    async fn get_care_tips(
        &self,
        input: &api::care_tips::CareTipsInput,
    ) -> anyhow::Result<api::care_tips::CareTips>;
}

pub type ImplStorageService = Box<dyn StorageService>;
pub type ImplCareTipsService = Box<dyn CareTipsService>;

/// Storage prefix owning every file of a user
pub fn user_storage_prefix(user_id: i64) -> String {
    format!("users/{user_id}/")
}
