//! In-process cache backed by `moka`.

use super::service::{CacheResult, CacheService};
use crate::domain::entities::ItemSummary;
use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Clone)]
struct Entry {
    items: Arc<Vec<ItemSummary>>,
    ttl: Duration,
}

/// Expires each entry `ttl` after it was written.
struct EntryTtl;

impl Expiry<String, Entry> for EntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &Entry,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &Entry,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

/// Process-wide TTL cache.
///
/// Entries expire a fixed duration after insertion; reads do not extend their
/// lifetime. Cloning is cheap and clones share storage.
#[derive(Clone)]
pub struct MemoryCache {
    inner: Cache<String, Entry>,
    default_ttl: Duration,
}

impl MemoryCache {
    /// Creates a cache holding at most `max_entries` lists, each living
    /// `default_ttl` unless a TTL is passed to [`CacheService::set_items`].
    pub fn new(max_entries: u64, default_ttl: Duration) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_entries)
            .expire_after(EntryTtl)
            .build();

        debug!(
            max_entries,
            ttl_secs = default_ttl.as_secs(),
            "Using MemoryCache"
        );

        Self { inner, default_ttl }
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get_items(&self, key: &str) -> CacheResult<Option<Vec<ItemSummary>>> {
        match self.inner.get(key).await {
            Some(entry) => {
                debug!("Cache HIT: {}", key);
                Ok(Some(entry.items.as_ref().clone()))
            }
            None => {
                debug!("Cache MISS: {}", key);
                Ok(None)
            }
        }
    }

    async fn set_items(
        &self,
        key: &str,
        items: &[ItemSummary],
        ttl: Option<Duration>,
    ) -> CacheResult<()> {
        let ttl = ttl.unwrap_or(self.default_ttl);
        self.inner
            .insert(
                key.to_string(),
                Entry {
                    items: Arc::new(items.to_vec()),
                    ttl,
                },
            )
            .await;

        debug!("Cache SET: {} ({} items, TTL: {}s)", key, items.len(), ttl.as_secs());
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<()> {
        self.inner.invalidate(key).await;
        debug!("Cache INVALIDATE: {}", key);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
