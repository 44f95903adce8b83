//! Cache service trait and error types.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::ItemSummary;

/// Key under which the full items list is cached.
pub const ITEMS_LIST_KEY: &str = "items-list";

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching the items list.
///
/// Implementations must be thread-safe and fail open: a cache failure is
/// logged and reported as a miss so requests fall back to the database.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryCache`] - In-process cache with TTL
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Retrieves a cached items list.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(items))` on cache hit
    /// - `Ok(None)` on cache miss or error (fail-open behavior)
    async fn get_items(&self, key: &str) -> CacheResult<Option<Vec<ItemSummary>>>;

    /// Stores an items list.
    ///
    /// `ttl` overrides the implementation default when given. Implementations
    /// that cannot honour a per-entry TTL use their configured one.
    async fn set_items(
        &self,
        key: &str,
        items: &[ItemSummary],
        ttl: Option<Duration>,
    ) -> CacheResult<()>;

    /// Removes a cached list. Used after item writes.
    async fn invalidate(&self, key: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Backend name reported by the health endpoint.
    fn backend(&self) -> &'static str;
}
