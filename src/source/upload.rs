use std::time::Duration;

use async_trait::async_trait;

use super::Uploader;
use crate::cabinet::ItemId;
use crate::error::Result;

/// Stand-in uploader that accepts every upload after a fixed latency.
pub struct StubUploader {
    latency: Duration,
}

impl StubUploader {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl Uploader for StubUploader {
    async fn upload(&self, id: &ItemId, version: &str) -> Result<()> {
        tokio::time::sleep(self.latency).await;
        tracing::info!(item = %id, version, "upload accepted");
        Ok(())
    }
}
