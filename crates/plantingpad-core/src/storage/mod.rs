//! Layout item store abstraction.
//!
//! Items are owned and fetched by an external collaborator; the canvas only
//! reads the ordered sequence and replaces single entries by id.

mod memory;

pub use memory::MemoryStore;

use crate::layout::LayoutItem;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Layout item not found: {0}")]
    NotFound(String),
    #[error("Duplicate layout item id: {0}")]
    DuplicateId(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Ordered collection of layout items. Order is paint order (back to front).
pub trait LayoutItemStore {
    /// All items in paint order.
    fn items(&self) -> &[LayoutItem];

    /// Replace the item identified by `id` with `item`.
    fn replace_item(&mut self, id: &str, item: LayoutItem) -> StoreResult<()>;

    /// Look up an item by id.
    fn get(&self, id: &str) -> Option<&LayoutItem> {
        self.items().iter().find(|item| item.id == id)
    }

    /// Check if the store holds no items.
    fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    /// Get the number of items.
    fn len(&self) -> usize {
        self.items().len()
    }
}
