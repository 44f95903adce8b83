//! Order management service.

use crate::domain::entities::{NewOrderItem, Order, OrderDraft};
use crate::domain::repositories::{OrderRepository, Paging};
use crate::error::AppError;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Service for orders and their lines.
pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
}

impl OrderService {
    /// Creates a new order service.
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self { repository }
    }

    /// Lists a window of orders.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn list_orders(&self, paging: Paging) -> Result<Vec<Order>, AppError> {
        self.repository.list(paging).await
    }

    /// Retrieves an order by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_order(&self, id: Uuid) -> Result<Order, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Order Not Found", json!({ "id": id })))
    }

    /// Creates or updates an order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] with message "Creation failed" on any
    /// datastore failure, including an unknown customer.
    pub async fn upsert_order(&self, draft: OrderDraft) -> Result<Order, AppError> {
        self.repository.upsert(draft).await.map_err(|e| {
            tracing::error!(error = %e, "Order upsert failed");
            AppError::internal("Creation failed", json!({}))
        })
    }

    /// Adds lines to an order.
    ///
    /// Lines repeating an item id are merged, the last quantity wins.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] with message "Addition failed" on any
    /// datastore failure, including an unknown order or item.
    pub async fn add_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, AppError> {
        self.repository
            .add_items(order_id, merge_lines(items))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, %order_id, "Adding order items failed");
                AppError::internal("Addition failed", json!({}))
            })
    }

    /// Removes one line from an order.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the order or the line does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn remove_item(&self, order_id: Uuid, item_id: i32) -> Result<Order, AppError> {
        self.repository
            .remove_item(order_id, item_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(
                    "Order or item Not Found",
                    json!({ "orderId": order_id, "itemId": item_id }),
                )
            })
    }
}

/// Collapses lines with the same item id, keeping first-seen order and the
/// last quantity.
fn merge_lines(items: Vec<NewOrderItem>) -> Vec<NewOrderItem> {
    let mut merged: Vec<NewOrderItem> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.item_id == item.item_id) {
            Some(existing) => existing.quantity = item.quantity,
            None => merged.push(item),
        }
    }
    merged
}
