//! Collaborators that supply folder listings and perform uploads.

pub mod fixture;
pub mod json;
pub mod upload;

use async_trait::async_trait;

use crate::cabinet::{FolderId, Item, ItemId};
use crate::error::Result;

pub use fixture::FixtureSource;
pub use json::JsonFileSource;
pub use upload::StubUploader;

/// Supplies the ordered contents of a folder.
#[async_trait]
pub trait FolderSource: Send + Sync {
    async fn fetch(&self, folder_id: &FolderId) -> Result<Vec<Item>>;
}

/// Uploads an item so that it ends up at `version`.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn upload(&self, id: &ItemId, version: &str) -> Result<()>;
}
