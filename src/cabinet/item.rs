use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Opaque identifier of a file or folder, unique within one listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Folders are addressed by the id of their item.
pub type FolderId = ItemId;

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a record is a file or a folder. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    File,
    Folder,
}

/// A file or folder record in the active listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub last_updated: DateTime<Utc>,
    /// Size in kilobytes.
    pub size: u64,
    pub version: String,
    pub updated_by: String,
}

impl Item {
    /// Mutations target items by id only.
    pub fn is(&self, id: &ItemId) -> bool {
        &self.id == id
    }

    pub fn is_folder(&self) -> bool {
        self.kind == ItemKind::Folder
    }
}

/// A display name that is known to be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemName(String);

impl ItemName {
    /// Validate `raw` as a name, rejecting the empty string.
    pub fn parse(raw: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }
        Ok(Self(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Version label an upload of an item currently at `current` produces.
///
/// A dotted numeric label has its last component incremented; any other
/// label gets `.1` appended. Labels are only guaranteed to change.
pub fn next_version(current: &str) -> String {
    let (head, last) = match current.rsplit_once('.') {
        Some((head, last)) => (Some(head), last),
        None => (None, current),
    };
    let head_is_numeric = head.map_or(true, |h| {
        h.split('.')
            .all(|part| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()))
    });

    let bumped = last
        .parse::<u64>()
        .ok()
        .filter(|_| head_is_numeric)
        .and_then(|n| n.checked_add(1));

    match (head, bumped) {
        (Some(head), Some(n)) => format!("{}.{}", head, n),
        (None, Some(n)) => n.to_string(),
        (_, None) => format!("{}.1", current),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn item(id: &str, name: &str, kind: ItemKind) -> Item {
        Item {
            id: ItemId::from(id),
            name: name.to_string(),
            kind,
            last_updated: Utc.with_ymd_and_hms(2023, 8, 19, 12, 0, 0).unwrap(),
            size: 500,
            version: "1.0".to_string(),
            updated_by: "userA".to_string(),
        }
    }

    pub fn file(id: &str, name: &str) -> Item {
        item(id, name, ItemKind::File)
    }

    pub fn folder(id: &str, name: &str) -> Item {
        item(id, name, ItemKind::Folder)
    }
}
