//! In-memory layout item store.

use super::{LayoutItemStore, StoreError, StoreResult};
use crate::layout::LayoutItem;

/// Vec-backed store for hardcoded or pre-fetched items.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Vec<LayoutItem>,
}

impl MemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store from an ordered list of items.
    ///
    /// Bounding boxes are normalized; duplicate ids are rejected.
    pub fn from_items(items: Vec<LayoutItem>) -> StoreResult<Self> {
        let mut store = Self::new();
        for item in items {
            store.push(item)?;
        }
        Ok(store)
    }

    /// The two starter beds shown on a fresh canvas.
    pub fn with_defaults() -> Self {
        Self {
            items: vec![
                LayoutItem::new(0.0, 0.0, 50.0, 50.0)
                    .with_id("default-blue")
                    .with_fill_color("blue"),
                LayoutItem::new(50.0, 100.0, 50.0, 50.0)
                    .with_id("default-red")
                    .with_fill_color("red"),
            ],
        }
    }

    /// Add an item on top of all others.
    pub fn push(&mut self, mut item: LayoutItem) -> StoreResult<()> {
        if self.get(&item.id).is_some() {
            return Err(StoreError::DuplicateId(item.id));
        }
        item.normalize();
        self.items.push(item);
        Ok(())
    }

    /// Remove an item by id.
    pub fn remove(&mut self, id: &str) -> Option<LayoutItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        Some(self.items.remove(index))
    }

    /// Remove all items.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl LayoutItemStore for MemoryStore {
    fn items(&self) -> &[LayoutItem] {
        &self.items
    }

    fn replace_item(&mut self, id: &str, mut item: LayoutItem) -> StoreResult<()> {
        let index = self
            .items
            .iter()
            .position(|existing| existing.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        if item.id != id && self.items.iter().any(|existing| existing.id == item.id) {
            return Err(StoreError::DuplicateId(item.id));
        }

        item.normalize();
        self.items[index] = item;
        Ok(())
    }
}
