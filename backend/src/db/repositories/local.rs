//! In-memory local repository implementation.
//!
//! Stores items in a `BTreeMap` behind a lock, which makes it fast,
//! deterministic and isolated for unit tests and local development.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::repository::{ErrorContext, ItemRepository, RepositoryError, RepositoryResult};
use crate::models::{Item, ItemDraft, ItemId};

/// In-memory local repository.
///
/// Cloning the repository shares the underlying table.
///
/// # Example
/// ```
/// use items_rust::db::repositories::LocalRepository;
/// use items_rust::db::ItemRepository;
/// use items_rust::models::ItemDraft;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// let id = repo.create_item(&ItemDraft::default()).await.unwrap();
/// assert_eq!(repo.get_item(id).await.unwrap().id, id);
/// # });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    items: BTreeMap<ItemId, Item>,
    next_item_id: ItemId,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            items: BTreeMap::new(),
            next_item_id: ItemId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    ///
    /// While unhealthy, every operation except `health_check` fails with a
    /// connection error.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository. Id assignment restarts at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of items stored.
    pub fn item_count(&self) -> usize {
        self.data.read().items.len()
    }

    /// Check if an item exists.
    pub fn has_item(&self, id: ItemId) -> bool {
        self.data.read().items.contains_key(&id)
    }

    fn check_health(&self, operation: &str) -> RepositoryResult<()> {
        if !self.data.read().is_healthy {
            return Err(RepositoryError::connection_with_context(
                "Database is not healthy",
                ErrorContext::new(operation).with_entity("item"),
            ));
        }
        Ok(())
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ItemRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn create_item(&self, draft: &ItemDraft) -> RepositoryResult<ItemId> {
        self.check_health("create_item")?;

        let mut data = self.data.write();
        let id = data.next_item_id;
        data.next_item_id = ItemId(id.0 + 1);
        data.items.insert(id, draft.clone().with_id(id));

        Ok(id)
    }

    async fn list_items(&self) -> RepositoryResult<Vec<Item>> {
        self.check_health("list_items")?;
        Ok(self.data.read().items.values().cloned().collect())
    }

    async fn get_item(&self, id: ItemId) -> RepositoryResult<Item> {
        self.check_health("get_item")?;
        self.data.read().items.get(&id).cloned().ok_or_else(|| {
            RepositoryError::not_found_with_context(
                format!("Item {} not found", id),
                ErrorContext::new("get_item")
                    .with_entity("item")
                    .with_entity_id(id),
            )
        })
    }

    async fn update_item(&self, id: ItemId, draft: &ItemDraft) -> RepositoryResult<u64> {
        self.check_health("update_item")?;

        let mut data = self.data.write();
        match data.items.get_mut(&id) {
            Some(existing) => {
                *existing = draft.clone().with_id(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_item(&self, id: ItemId) -> RepositoryResult<u64> {
        self.check_health("delete_item")?;
        let removed = self.data.write().items.remove(&id).is_some();
        Ok(u64::from(removed))
    }

    async fn search_items_by_name(&self, name: &str) -> RepositoryResult<Vec<Item>> {
        self.check_health("search_items_by_name")?;
        Ok(self
            .data
            .read()
            .items
            .values()
            .filter(|item| item.name == name)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ItemDate;

    fn widget() -> ItemDraft {
        ItemDraft {
            family_id: 1,
            name: "Widget".to_string(),
            date: ItemDate::parse("2024-01-15").unwrap(),
            supplier_id: 2,
            price: 9.99,
            inactive: false,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let repo = LocalRepository::new();
        assert!(repo.health_check().await.unwrap());

        repo.set_healthy(false);
        assert!(!repo.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_create_and_get_item() {
        let repo = LocalRepository::new();

        let id = repo.create_item(&widget()).await.unwrap();
        let item = repo.get_item(id).await.unwrap();

        assert_eq!(item.id, id);
        assert_eq!(ItemDraft::from(item), widget());
    }

    #[tokio::test]
    async fn test_ids_are_unique() {
        let repo = LocalRepository::new();
        let a = repo.create_item(&widget()).await.unwrap();
        let b = repo.create_item(&widget()).await.unwrap();
        assert_ne!(a, b);
        assert_eq!(repo.item_count(), 2);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let repo = LocalRepository::new();
        let a = repo.create_item(&widget()).await.unwrap();
        repo.delete_item(a).await.unwrap();
        let b = repo.create_item(&widget()).await.unwrap();
        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_not_found_error() {
        let repo = LocalRepository::new();

        let result = repo.get_item(ItemId(999)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_update_missing_is_noop() {
        let repo = LocalRepository::new();

        let affected = repo.update_item(ItemId(5), &widget()).await.unwrap();
        assert_eq!(affected, 0);
        assert!(!repo.has_item(ItemId(5)));
        assert_eq!(repo.item_count(), 0);
    }

    #[tokio::test]
    async fn test_update_overwrites_all_fields() {
        let repo = LocalRepository::new();
        let id = repo.create_item(&widget()).await.unwrap();

        let replacement = ItemDraft {
            name: "Gadget".to_string(),
            inactive: true,
            ..Default::default()
        };
        assert_eq!(repo.update_item(id, &replacement).await.unwrap(), 1);

        let item = repo.get_item(id).await.unwrap();
        assert_eq!(item.name, "Gadget");
        assert_eq!(item.family_id, 0);
        assert!(item.date.is_zero());
        assert!(item.inactive);
    }

    #[tokio::test]
    async fn test_search_exact_match() {
        let repo = LocalRepository::new();
        repo.create_item(&widget()).await.unwrap();
        repo.create_item(&ItemDraft {
            name: "Widgets".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

        let found = repo.search_items_by_name("Widget").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Widget");
        assert!(repo.search_items_by_name("widget").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unhealthy_store_fails_operations() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let err = repo.list_items().await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(err.to_string().contains("Database is not healthy"));
    }

    #[tokio::test]
    async fn test_clear_resets_ids() {
        let repo = LocalRepository::new();
        repo.create_item(&widget()).await.unwrap();
        repo.clear();
        assert_eq!(repo.item_count(), 0);
        assert_eq!(repo.create_item(&widget()).await.unwrap(), ItemId(1));
    }
}
