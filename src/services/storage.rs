use async_trait::async_trait;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};

use crate::services;

/// S3 can delete up to 1000 keys per request
const DELETE_BATCH_SIZE: usize = 1000;

#[derive(Clone)]
pub struct StorageHandler {
    pub client: aws_sdk_s3::Client,
    pub bucket: String,
}

#[async_trait]
impl services::StorageService for StorageHandler {
    async fn save_file(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> anyhow::Result<()> {
        let body = aws_sdk_s3::primitives::ByteStream::from(body);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await?;

        Ok(())
    }

    async fn get_file(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        let object = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await?;

        Ok(object
            .body
            .collect()
            .await
            .map(|package| package.into_bytes())?
            .into_iter()
            .collect::<Vec<u8>>())
    }

    async fn delete_user_files(&self, user_id: i64) -> anyhow::Result<()> {
        let mut keys: Vec<String> = Vec::new();

        let mut paginator = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(services::user_storage_prefix(user_id))
            .into_paginator()
            .send();

        while let Some(page) = paginator.next().await {
            let page = page?;
            keys.extend(
                page.contents()
                    .iter()
                    .filter_map(|object| object.key().map(str::to_string)),
            );
        }

        for batch in keys.chunks(DELETE_BATCH_SIZE) {
            let objects = batch
                .iter()
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()?;

            self.client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(Delete::builder().set_objects(Some(objects)).build()?)
                .send()
                .await?;
        }

        tracing::info!("removed {} stored files of user {}", keys.len(), user_id);

        Ok(())
    }
}
