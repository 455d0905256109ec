//! The ordered item list of the active folder.
//!
//! Every mutation produces a new sequence from the previous one by an
//! id-keyed transform. Items keep their positions; nothing is re-sorted.
//! An id with no match leaves the sequence as it was.

use std::sync::Arc;

use super::item::{Item, ItemId, ItemName};

/// Install `new_items` verbatim, discarding whatever was listed before.
pub fn replace_all(new_items: Vec<Item>) -> Vec<Item> {
    new_items
}

/// Drop the item with `id`.
pub fn remove_by_id(items: &[Item], id: &ItemId) -> Vec<Item> {
    items.iter().filter(|item| !item.is(id)).cloned().collect()
}

/// Replace the name of the item with `id`, leaving every other field alone.
pub fn rename_by_id(items: &[Item], id: &ItemId, new_name: &ItemName) -> Vec<Item> {
    map_by_id(items, id, |item| item.name = new_name.as_str().to_string())
}

/// Replace the version label of the item with `id`.
pub fn bump_version_by_id(items: &[Item], id: &ItemId, new_version: &str) -> Vec<Item> {
    map_by_id(items, id, |item| item.version = new_version.to_string())
}

fn map_by_id(items: &[Item], id: &ItemId, edit: impl Fn(&mut Item)) -> Vec<Item> {
    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if item.is(id) {
                edit(&mut item);
            }
            item
        })
        .collect()
}

/// Owner of the current item snapshot.
///
/// Writes always derive from the latest snapshot, so successive updates
/// compose instead of overwriting each other. A snapshot handed out earlier
/// stays intact.
#[derive(Debug, Default)]
pub struct CollectionStore {
    items: Arc<Vec<Item>>,
}

impl CollectionStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: Arc::new(items),
        }
    }

    /// The current list.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// A shared handle to the current list that later writes will not touch.
    pub fn snapshot(&self) -> Arc<Vec<Item>> {
        Arc::clone(&self.items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.is(id))
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.get(id).is_some()
    }

    /// Apply a transform to the latest list.
    pub fn update<F>(&mut self, transform: F)
    where
        F: FnOnce(&[Item]) -> Vec<Item>,
    {
        self.items = Arc::new(transform(&self.items));
    }

    pub fn replace(&mut self, new_items: Vec<Item>) {
        self.update(|_| replace_all(new_items));
    }

    /// Remove `id`. Returns whether an item was removed.
    pub fn remove(&mut self, id: &ItemId) -> bool {
        if !self.contains(id) {
            tracing::debug!(%id, "remove skipped, id not in listing");
            return false;
        }
        self.update(|items| remove_by_id(items, id));
        true
    }

    /// Rename `id`. Returns whether an item was renamed.
    pub fn rename(&mut self, id: &ItemId, new_name: &ItemName) -> bool {
        if !self.contains(id) {
            tracing::debug!(%id, "rename skipped, id not in listing");
            return false;
        }
        self.update(|items| rename_by_id(items, id, new_name));
        true
    }

    /// Set the version of `id`. Returns whether an item was updated.
    pub fn bump_version(&mut self, id: &ItemId, new_version: &str) -> bool {
        if !self.contains(id) {
            tracing::debug!(%id, "version bump skipped, id not in listing");
            return false;
        }
        self.update(|items| bump_version_by_id(items, id, new_version));
        true
    }
}
