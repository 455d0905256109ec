use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::FolderSource;
use crate::cabinet::{FolderId, Item};
use crate::error::{AppError, Result};

/// Folder listings read from a JSON file of the form
/// `{ "<folder id>": [ <item>, ... ], ... }`.
///
/// The file is re-read on every fetch so edits show up on reload.
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

#[async_trait]
impl FolderSource for JsonFileSource {
    async fn fetch(&self, folder_id: &FolderId) -> Result<Vec<Item>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let mut folders: HashMap<FolderId, Vec<Item>> = serde_json::from_str(&content)?;
        folders
            .remove(folder_id)
            .ok_or_else(|| AppError::FolderNotFound(folder_id.to_string()))
    }
}
