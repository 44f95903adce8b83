//! Shared application state injected into every handler.

use crate::application::services::{CustomerService, ItemService, OrderService};
use crate::domain::repositories::{
    CustomerRepository, HealthRepository, ItemRepository, OrderRepository,
};
use crate::infrastructure::cache::CacheService;
use std::sync::Arc;
use std::time::Duration;

/// Services and infrastructure handles shared across requests.
///
/// Cloning is cheap, every field is reference counted.
#[derive(Clone)]
pub struct AppState {
    pub customer_service: Arc<CustomerService>,
    pub item_service: Arc<ItemService>,
    pub order_service: Arc<OrderService>,
    pub health: Arc<dyn HealthRepository>,
    pub cache: Arc<dyn CacheService>,
    /// Trust `X-Forwarded-*` headers when building absolute URLs.
    pub behind_proxy: bool,
}

/// Repository implementations the services are built from.
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub items: Arc<dyn ItemRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub health: Arc<dyn HealthRepository>,
}

impl AppState {
    /// Wires services on top of `repositories` and `cache`.
    ///
    /// - `items_cache_ttl` - lifetime of the cached items list
    pub fn new(
        repositories: Repositories,
        cache: Arc<dyn CacheService>,
        items_cache_ttl: Duration,
        behind_proxy: bool,
    ) -> Self {
        let Repositories {
            customers,
            items,
            orders,
            health,
        } = repositories;

        Self {
            customer_service: Arc::new(CustomerService::new(customers, orders.clone())),
            item_service: Arc::new(ItemService::new(items, cache.clone(), items_cache_ttl)),
            order_service: Arc::new(OrderService::new(orders)),
            health,
            cache,
            behind_proxy,
        }
    }
}
