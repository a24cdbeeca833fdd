//! High-level database service layer.
//!
//! Repository-agnostic functions, one per store operation. They add logging
//! and error context on top of the raw [`ItemRepository`] calls, and work
//! with any implementation, including `&dyn ItemRepository`.
//!
//! # Usage
//!
//! ```no_run
//! use items_rust::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let items = services::list_items(&repo).await?;
//!     println!("Found {} items", items.len());
//!     Ok(())
//! }
//! ```

use log::{debug, info};

use super::repository::{ItemRepository, RepositoryResult};
use crate::models::{Item, ItemDraft, ItemId};

/// Check if the backing store is reachable.
pub async fn health_check<R: ItemRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Insert an item and return it with its assigned id.
pub async fn create_item<R: ItemRepository + ?Sized>(
    repo: &R,
    draft: ItemDraft,
) -> RepositoryResult<Item> {
    let id = repo
        .create_item(&draft)
        .await
        .map_err(|e| e.with_operation("create_item"))?;
    info!("Created item {} ('{}')", id, draft.name);
    Ok(draft.with_id(id))
}

/// List every item.
pub async fn list_items<R: ItemRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Item>> {
    let items = repo.list_items().await?;
    debug!("Listed {} items", items.len());
    Ok(items)
}

/// Fetch one item by id.
pub async fn get_item<R: ItemRepository + ?Sized>(repo: &R, id: ItemId) -> RepositoryResult<Item> {
    repo.get_item(id).await
}

/// Overwrite an item and return the caller's data merged with `id`.
///
/// The row is not re-read. An id that matches nothing is not an error; the
/// store is left unchanged and the echo is still returned.
pub async fn update_item<R: ItemRepository + ?Sized>(
    repo: &R,
    id: ItemId,
    draft: ItemDraft,
) -> RepositoryResult<Item> {
    let affected = repo
        .update_item(id, &draft)
        .await
        .map_err(|e| e.with_operation("update_item"))?;
    if affected == 0 {
        debug!("Update of item {} matched no rows", id);
    } else {
        info!("Updated item {}", id);
    }
    Ok(draft.with_id(id))
}

/// Delete an item. Deleting a missing id succeeds.
pub async fn delete_item<R: ItemRepository + ?Sized>(repo: &R, id: ItemId) -> RepositoryResult<()> {
    let affected = repo
        .delete_item(id)
        .await
        .map_err(|e| e.with_operation("delete_item"))?;
    if affected == 0 {
        debug!("Delete of item {} matched no rows", id);
    } else {
        info!("Deleted item {}", id);
    }
    Ok(())
}

/// Items whose name equals `name` exactly.
pub async fn search_items_by_name<R: ItemRepository + ?Sized>(
    repo: &R,
    name: &str,
) -> RepositoryResult<Vec<Item>> {
    let items = repo.search_items_by_name(name).await?;
    debug!("Search for '{}' matched {} items", name, items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::RepositoryError;
    use crate::models::ItemDate;

    fn draft(name: &str) -> ItemDraft {
        ItemDraft {
            family_id: 1,
            name: name.to_string(),
            date: ItemDate::parse("2024-03-01").unwrap(),
            supplier_id: 2,
            price: 1.5,
            inactive: false,
        }
    }

    #[tokio::test]
    async fn test_create_then_get_matches_input() {
        let repo = LocalRepository::new();
        let created = create_item(&repo, draft("Bolt")).await.unwrap();
        let fetched = get_item(&repo, created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(ItemDraft::from(fetched), draft("Bolt"));
    }

    #[tokio::test]
    async fn test_update_missing_echoes_without_creating() {
        let repo = LocalRepository::new();
        let echoed = update_item(&repo, ItemId(42), draft("Ghost")).await.unwrap();

        assert_eq!(echoed.id, ItemId(42));
        assert_eq!(repo.item_count(), 0);
        let err = get_item(&repo, ItemId(42)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_ok() {
        let repo = LocalRepository::new();
        assert!(delete_item(&repo, ItemId(7)).await.is_ok());
    }

    #[tokio::test]
    async fn test_list_empty() {
        let repo = LocalRepository::new();
        assert!(list_items(&repo).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_works_through_trait_object() {
        let repo: std::sync::Arc<dyn ItemRepository> = std::sync::Arc::new(LocalRepository::new());
        create_item(repo.as_ref(), draft("Nut")).await.unwrap();
        let found = search_items_by_name(repo.as_ref(), "Nut").await.unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn test_store_error_carries_operation() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        let err = create_item(&repo, draft("x")).await.unwrap_err();
        assert_eq!(err.context().operation.as_deref(), Some("create_item"));
    }
}
