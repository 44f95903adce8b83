//! Item management service with a cached list.

use crate::domain::entities::{Item, ItemDraft, ItemSummary};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;
use crate::infrastructure::cache::{CacheService, ITEMS_LIST_KEY};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Service for catalogue items.
///
/// The items list is read through the cache under [`ITEMS_LIST_KEY`] and the
/// entry is dropped after every successful create, update or delete, so the
/// list never outlives a write made through this service.
///
/// Every write bumps `list_generation` before invalidating. A list load that
/// overlaps a write sees the bump and does not leave its snapshot cached.
pub struct ItemService {
    repository: Arc<dyn ItemRepository>,
    cache: Arc<dyn CacheService>,
    list_ttl: Duration,
    list_generation: AtomicU64,
}

impl ItemService {
    /// Creates a new item service.
    ///
    /// - `list_ttl` - lifetime of the cached items list
    pub fn new(
        repository: Arc<dyn ItemRepository>,
        cache: Arc<dyn CacheService>,
        list_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            cache,
            list_ttl,
            list_generation: AtomicU64::new(0),
        }
    }

    /// Lists all items, serving from cache when possible.
    ///
    /// Cache errors are treated as misses.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_items(&self) -> Result<Vec<ItemSummary>, AppError> {
        match self.cache.get_items(ITEMS_LIST_KEY).await {
            Ok(Some(items)) => {
                metrics::counter!("items_cache_hits_total").increment(1);
                return Ok(items);
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, "Items cache lookup failed"),
        }
        metrics::counter!("items_cache_misses_total").increment(1);

        let generation = self.list_generation.load(Ordering::Acquire);
        let items = self.repository.list().await?;

        if self.list_generation.load(Ordering::Acquire) != generation {
            tracing::debug!("Items changed during list load, not caching");
            return Ok(items);
        }

        if let Err(e) = self
            .cache
            .set_items(ITEMS_LIST_KEY, &items, Some(self.list_ttl))
            .await
        {
            tracing::warn!(error = %e, "Failed to cache items list");
        }

        // A write may have invalidated between the check and the store.
        if self.list_generation.load(Ordering::Acquire) != generation {
            self.drop_cached_list().await;
        }

        Ok(items)
    }

    /// Retrieves an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_item(&self, id: i32) -> Result<Item, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| item_not_found(id))
    }

    /// Creates an item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] with message "Creation failed" on any
    /// datastore failure.
    pub async fn create_item(&self, draft: ItemDraft) -> Result<Item, AppError> {
        let item = self.repository.create(draft).await.map_err(|e| {
            tracing::error!(error = %e, "Item creation failed");
            AppError::internal("Creation failed", json!({}))
        })?;

        self.invalidate_list().await;
        Ok(item)
    }

    /// Overwrites an existing item.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn update_item(&self, id: i32, draft: ItemDraft) -> Result<Item, AppError> {
        let item = self
            .repository
            .update(id, draft)
            .await?
            .ok_or_else(|| item_not_found(id))?;

        self.invalidate_list().await;
        Ok(item)
    }

    /// Deletes an item and returns the deleted record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the item does not exist.
    /// Returns [`AppError::Internal`] on any other database error.
    pub async fn delete_item(&self, id: i32) -> Result<Item, AppError> {
        let item = self
            .repository
            .delete(id)
            .await?
            .ok_or_else(|| item_not_found(id))?;

        self.invalidate_list().await;
        Ok(item)
    }

    async fn invalidate_list(&self) {
        self.list_generation.fetch_add(1, Ordering::AcqRel);
        self.drop_cached_list().await;
    }

    async fn drop_cached_list(&self) {
        if let Err(e) = self.cache.invalidate(ITEMS_LIST_KEY).await {
            tracing::warn!(error = %e, "Failed to invalidate items list cache");
        }
    }
}

fn item_not_found(id: i32) -> AppError {
    AppError::not_found("Item Not Found", json!({ "id": id }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockItemRepository;
    use crate::infrastructure::cache::{MemoryCache, NullCache};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicBool;
    use tokio::sync::Notify;

    /// Item table whose first `list` call snapshots the rows and then waits
    /// until released, so a write can land while the load is in flight.
    #[derive(Default)]
    struct StallingItemRepository {
        rows: Mutex<Vec<ItemSummary>>,
        stalled: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ItemRepository for StallingItemRepository {
        async fn list(&self) -> Result<Vec<ItemSummary>, AppError> {
            let snapshot = self.rows.lock().unwrap().clone();
            if !self.stalled.swap(true, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(snapshot)
        }

        async fn find_by_id(&self, _id: i32) -> Result<Option<Item>, AppError> {
            Ok(None)
        }

        async fn create(&self, draft: ItemDraft) -> Result<Item, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let id = rows.len() as i32 + 1;
            rows.push(ItemSummary {
                id,
                name: draft.name.clone(),
            });
            Ok(Item {
                id,
                name: draft.name,
                description: draft.description,
            })
        }

        async fn update(&self, _id: i32, _draft: ItemDraft) -> Result<Option<Item>, AppError> {
            Ok(None)
        }

        async fn delete(&self, _id: i32) -> Result<Option<Item>, AppError> {
            Ok(None)
        }
    }

    fn summaries() -> Vec<ItemSummary> {
        vec![ItemSummary {
            id: 1,
            name: "Bike".to_string(),
        }]
    }

    fn item(id: i32) -> Item {
        Item {
            id,
            name: "Bike".to_string(),
            description: Some("Red".to_string()),
        }
    }

    fn draft() -> ItemDraft {
        ItemDraft {
            name: "Bike".to_string(),
            description: Some("Red".to_string()),
        }
    }

    fn memory_cache() -> Arc<MemoryCache> {
        Arc::new(MemoryCache::new(16, Duration::from_secs(60)))
    }

    #[tokio::test]
    async fn test_list_items_hits_repository_once() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_list()
            .times(1)
            .returning(|| Ok(summaries()));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let first = service.list_items().await.unwrap();
        let second = service.list_items().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
    }

    #[tokio::test]
    async fn test_list_items_without_cache_reads_every_time() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_list()
            .times(2)
            .returning(|| Ok(summaries()));

        let service = ItemService::new(
            Arc::new(mock_repo),
            Arc::new(NullCache::new()),
            Duration::from_secs(60),
        );

        service.list_items().await.unwrap();
        service.list_items().await.unwrap();
    }

    #[tokio::test]
    async fn test_create_item_invalidates_list() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_list()
            .times(2)
            .returning(|| Ok(summaries()));
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(item(2)));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        service.list_items().await.unwrap();
        service.create_item(draft()).await.unwrap();
        service.list_items().await.unwrap();
    }

    #[tokio::test]
    async fn test_list_loaded_across_a_write_is_not_cached() {
        let repo = Arc::new(StallingItemRepository::default());
        let service = Arc::new(ItemService::new(
            repo.clone(),
            memory_cache(),
            Duration::from_secs(60),
        ));

        let reader = tokio::spawn({
            let service = service.clone();
            async move { service.list_items().await }
        });

        repo.entered.notified().await;
        service.create_item(draft()).await.unwrap();
        repo.release.notify_one();

        let stale = reader.await.unwrap().unwrap();
        assert!(stale.is_empty());

        let fresh = service.list_items().await.unwrap();
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].name, "Bike");
    }

    #[tokio::test]
    async fn test_create_item_failure_is_generic() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_create()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let err = service.create_item(draft()).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(err.to_string(), "Creation failed");
    }

    #[tokio::test]
    async fn test_get_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_find_by_id()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| Ok(None));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let err = service.get_item(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Item Not Found");
    }

    #[tokio::test]
    async fn test_update_item_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_update()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let err = service.update_item(7, draft()).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_item_is_not_found() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(None));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let err = service.delete_item(999_999).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_propagates_other_errors() {
        let mut mock_repo = MockItemRepository::new();
        mock_repo
            .expect_delete()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));

        let service = ItemService::new(
            Arc::new(mock_repo),
            memory_cache(),
            Duration::from_secs(60),
        );

        let err = service.delete_item(1).await.unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
    }
}
