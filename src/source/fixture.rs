use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::FolderSource;
use crate::cabinet::{FolderId, Item, ItemId, ItemKind};
use crate::error::{AppError, Result};

/// Built-in listing served for every folder id.
pub struct FixtureSource {
    delay: Duration,
}

impl FixtureSource {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl FolderSource for FixtureSource {
    async fn fetch(&self, folder_id: &FolderId) -> Result<Vec<Item>> {
        tracing::debug!(folder = %folder_id, "serving fixture listing");
        tokio::time::sleep(self.delay).await;
        fixture_items()
    }
}

fn fixture_items() -> Result<Vec<Item>> {
    const ROWS: [(&str, &str, ItemKind, &str, u64, &str, &str); 5] = [
        ("1", "document1.txt", ItemKind::File, "2023-08-19T12:00:00Z", 500, "1.0", "userA"),
        ("2", "document2.pdf", ItemKind::File, "2023-08-18T10:30:00Z", 1500, "1.2", "userB"),
        ("3", "document3.docx", ItemKind::File, "2023-08-17T14:20:00Z", 2000, "2.0", "userC"),
        ("4", "document4.xlsx", ItemKind::File, "2023-08-16T09:15:00Z", 1000, "1.5", "userA"),
        ("5", "subfolder", ItemKind::Folder, "2023-08-15T16:45:00Z", 0, "1.0", "userD"),
    ];

    ROWS.iter()
        .map(|&(id, name, kind, updated, size, version, by)| {
            let last_updated = DateTime::parse_from_rfc3339(updated)
                .map_err(|e| AppError::Source(format!("bad fixture timestamp {}: {}", updated, e)))?
                .with_timezone(&Utc);
            Ok(Item {
                id: ItemId::from(id),
                name: name.to_string(),
                kind,
                last_updated,
                size,
                version: version.to_string(),
                updated_by: by.to_string(),
            })
        })
        .collect()
}
