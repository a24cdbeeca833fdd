//! Item repository trait.
//!
//! One method per store operation. Each call maps to exactly one statement
//! against the `items` relation; nothing here spans several statements.

use async_trait::async_trait;

use super::error::RepositoryResult;
use crate::models::{Item, ItemDraft, ItemId};

/// Repository trait for item persistence.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single handle can be shared by
/// every request task.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Check if the backing store is reachable.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Insert a new item and return the id the store assigned to it.
    async fn create_item(&self, draft: &ItemDraft) -> RepositoryResult<ItemId>;

    /// Return every item. Order is implementation-defined.
    ///
    /// An empty store yields an empty vector, never an error.
    async fn list_items(&self) -> RepositoryResult<Vec<Item>>;

    /// Fetch one item.
    ///
    /// # Returns
    /// * `Err(RepositoryError::NotFound)` - If no row has this id
    async fn get_item(&self, id: ItemId) -> RepositoryResult<Item>;

    /// Overwrite every field except the id of the row keyed by `id`.
    ///
    /// Returns the number of rows affected. Zero is not an error.
    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> RepositoryResult<u64>;

    /// Remove the row keyed by `id`.
    ///
    /// Returns the number of rows affected. Zero is not an error.
    async fn delete_item(&self, id: ItemId) -> RepositoryResult<u64>;

    /// Items whose name equals `name` exactly.
    async fn search_items_by_name(&self, name: &str) -> RepositoryResult<Vec<Item>>;
}
