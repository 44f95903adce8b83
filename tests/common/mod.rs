#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::{Duration as ChronoDuration, Utc};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use orders_api::domain::entities::{
    Customer, CustomerDraft, Item, ItemDraft, ItemSummary, NewOrderItem, Order, OrderDraft,
    OrderItem,
};
use orders_api::domain::repositories::{
    CustomerRepository, HealthRepository, ItemRepository, OrderRepository, Paging,
};
use orders_api::error::AppError;
use orders_api::infrastructure::cache::{CacheService, MemoryCache};
use orders_api::routes::router;
use orders_api::state::{AppState, Repositories};

/// Tables kept in memory, shared by all fake repositories of one app.
#[derive(Default)]
pub struct Store {
    pub customers: Mutex<Vec<Customer>>,
    pub items: Mutex<BTreeMap<i32, Item>>,
    pub orders: Mutex<Vec<Order>>,
    pub database_down: AtomicBool,
}

impl Store {
    pub fn insert_customer(&self, name: &str, email: &str) -> Customer {
        let customer = Customer {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            address: None,
            created_at: Utc::now(),
        };
        self.customers.lock().unwrap().push(customer.clone());
        customer
    }

    /// Writes an item directly, bypassing the API and its cache invalidation.
    pub fn insert_item(&self, name: &str) -> Item {
        let mut items = self.items.lock().unwrap();
        let id = items.keys().next_back().copied().unwrap_or(0) + 1;
        let item = Item {
            id,
            name: name.to_string(),
            description: None,
        };
        items.insert(id, item.clone());
        item
    }

    pub fn insert_order(&self, customer_id: Uuid) -> Order {
        let mut orders = self.orders.lock().unwrap();
        let order = Order {
            id: Uuid::new_v4(),
            customer_id,
            created_at: Utc::now() + ChronoDuration::seconds(orders.len() as i64),
            order_items: Vec::new(),
        };
        orders.push(order.clone());
        order
    }
}

fn unavailable() -> AppError {
    AppError::internal("Database error", json!({}))
}

pub struct FakeCustomerRepository(pub Arc<Store>);

#[async_trait]
impl CustomerRepository for FakeCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let mut customers = self.0.customers.lock().unwrap().clone();
        customers.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(customers)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let customers = self.0.customers.lock().unwrap();
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let needle = query.to_lowercase();
        let customers = self.0.customers.lock().unwrap();
        Ok(customers
            .iter()
            .filter(|c| {
                c.name.to_lowercase().contains(&needle) || c.email.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn upsert(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        let mut customers = self.0.customers.lock().unwrap();
        let id = draft.resolve_id();

        if let Some(existing) = customers.iter_mut().find(|c| c.id == id) {
            existing.name = draft.name;
            existing.email = draft.email;
            existing.phone = draft.phone;
            existing.address = draft.address;
            return Ok(existing.clone());
        }

        let customer = Customer {
            id,
            name: draft.name,
            email: draft.email,
            phone: draft.phone,
            address: draft.address,
            created_at: Utc::now(),
        };
        customers.push(customer.clone());
        Ok(customer)
    }
}

pub struct FakeItemRepository(pub Arc<Store>);

#[async_trait]
impl ItemRepository for FakeItemRepository {
    async fn list(&self) -> Result<Vec<ItemSummary>, AppError> {
        let items = self.0.items.lock().unwrap();
        Ok(items.values().map(ItemSummary::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>, AppError> {
        Ok(self.0.items.lock().unwrap().get(&id).cloned())
    }

    async fn create(&self, draft: ItemDraft) -> Result<Item, AppError> {
        let mut items = self.0.items.lock().unwrap();
        let id = items.keys().next_back().copied().unwrap_or(0) + 1;
        let item = Item {
            id,
            name: draft.name,
            description: draft.description,
        };
        items.insert(id, item.clone());
        Ok(item)
    }

    async fn update(&self, id: i32, draft: ItemDraft) -> Result<Option<Item>, AppError> {
        let mut items = self.0.items.lock().unwrap();
        Ok(items.get_mut(&id).map(|item| {
            item.name = draft.name;
            item.description = draft.description;
            item.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Item>, AppError> {
        Ok(self.0.items.lock().unwrap().remove(&id))
    }
}

pub struct FakeOrderRepository(pub Arc<Store>);

#[async_trait]
impl OrderRepository for FakeOrderRepository {
    async fn list(&self, paging: Paging) -> Result<Vec<Order>, AppError> {
        let mut orders = self.0.orders.lock().unwrap().clone();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(orders
            .into_iter()
            .skip(paging.skip as usize)
            .take(paging.take as usize)
            .collect())
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError> {
        let orders = self.0.orders.lock().unwrap();
        Ok(orders
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let orders = self.0.orders.lock().unwrap();
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    async fn upsert(&self, draft: OrderDraft) -> Result<Order, AppError> {
        let customer_known = self
            .0
            .customers
            .lock()
            .unwrap()
            .iter()
            .any(|c| c.id == draft.customer_id);
        if !customer_known {
            return Err(AppError::internal("Foreign key violation", json!({})));
        }

        let id = draft.resolve_id();
        let mut orders = self.0.orders.lock().unwrap();

        if let Some(existing) = orders.iter_mut().find(|o| o.id == id) {
            existing.customer_id = draft.customer_id;
            return Ok(existing.clone());
        }

        let order = Order {
            id,
            customer_id: draft.customer_id,
            created_at: Utc::now() + ChronoDuration::seconds(orders.len() as i64),
            order_items: Vec::new(),
        };
        orders.push(order.clone());
        Ok(order)
    }

    async fn add_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, AppError> {
        {
            let known = self.0.items.lock().unwrap();
            if items.iter().any(|line| !known.contains_key(&line.item_id)) {
                return Err(AppError::internal("Foreign key violation", json!({})));
            }
        }

        let mut orders = self.0.orders.lock().unwrap();
        let order = orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or_else(|| AppError::internal("Foreign key violation", json!({})))?;

        for line in items {
            match order
                .order_items
                .iter_mut()
                .find(|existing| existing.item_id == line.item_id)
            {
                Some(existing) => existing.quantity = line.quantity,
                None => order.order_items.push(OrderItem {
                    order_id,
                    item_id: line.item_id,
                    quantity: line.quantity,
                }),
            }
        }
        order.order_items.sort_by_key(|line| line.item_id);

        Ok(order.clone())
    }

    async fn remove_item(&self, order_id: Uuid, item_id: i32) -> Result<Option<Order>, AppError> {
        let mut orders = self.0.orders.lock().unwrap();
        let Some(order) = orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(None);
        };

        let before = order.order_items.len();
        order.order_items.retain(|line| line.item_id != item_id);
        if order.order_items.len() == before {
            return Ok(None);
        }

        Ok(Some(order.clone()))
    }
}

pub struct FakeHealthRepository(pub Arc<Store>);

#[async_trait]
impl HealthRepository for FakeHealthRepository {
    async fn ping(&self) -> Result<(), AppError> {
        if self.0.database_down.load(Ordering::SeqCst) {
            Err(unavailable())
        } else {
            Ok(())
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<Store>,
    pub state: AppState,
}

pub fn create_test_state(store: Arc<Store>, cache: Arc<dyn CacheService>) -> AppState {
    let repositories = Repositories {
        customers: Arc::new(FakeCustomerRepository(store.clone())),
        items: Arc::new(FakeItemRepository(store.clone())),
        orders: Arc::new(FakeOrderRepository(store.clone())),
        health: Arc::new(FakeHealthRepository(store)),
    };

    AppState::new(repositories, cache, Duration::from_secs(3600), false)
}

pub fn spawn_app_with_cache(cache: Arc<dyn CacheService>) -> TestApp {
    let store = Arc::new(Store::default());
    let state = create_test_state(store.clone(), cache);
    let server = TestServer::new(router(state.clone())).unwrap();

    TestApp {
        server,
        store,
        state,
    }
}

/// App over empty fake tables with an in-memory items cache.
pub fn spawn_app() -> TestApp {
    spawn_app_with_cache(Arc::new(MemoryCache::new(16, Duration::from_secs(3600))))
}
