//! Repository trait for orders and order lines.

use crate::domain::entities::{NewOrderItem, Order, OrderDraft};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Offset/limit window over the orders table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub skip: i64,
    pub take: i64,
}

impl Paging {
    pub fn new(skip: i64, take: i64) -> Self {
        Self { skip, take }
    }
}

/// Repository interface for orders.
///
/// Every returned [`Order`] carries its lines in `order_items`.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgOrderRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Lists a window of orders ordered by creation time.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self, paging: Paging) -> Result<Vec<Order>, AppError>;

    /// Lists all orders of a customer.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError>;

    /// Finds an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError>;

    /// Creates the order, or reassigns its customer when the id already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors (e.g. unknown customer).
    async fn upsert(&self, draft: OrderDraft) -> Result<Order, AppError>;

    /// Adds lines to an order. An existing `(order, item)` line gets its
    /// quantity replaced.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors (unknown order or item).
    async fn add_items(&self, order_id: Uuid, items: Vec<NewOrderItem>)
    -> Result<Order, AppError>;

    /// Removes one line from an order and returns the updated order.
    ///
    /// Returns `Ok(None)` when the line does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove_item(&self, order_id: Uuid, item_id: i32) -> Result<Option<Order>, AppError>;
}
