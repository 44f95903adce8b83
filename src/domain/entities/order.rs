//! Domain entities for orders and their lines.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An order placed by a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub order_items: Vec<OrderItem>,
}

/// A single line of an order. Uniquely identified by `(order_id, item_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub order_id: Uuid,
    pub item_id: i32,
    pub quantity: i32,
}

/// Input for creating or updating an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub id: Option<Uuid>,
    pub customer_id: Uuid,
}

impl OrderDraft {
    /// Returns the id to upsert under, generating a v4 UUID when absent.
    pub fn resolve_id(&self) -> Uuid {
        self.id.unwrap_or_else(Uuid::new_v4)
    }
}

/// A line to add to an existing order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub item_id: i32,
    pub quantity: i32,
}

impl Order {
    /// Attaches lines to their orders, preserving the order of `orders`.
    ///
    /// Lines whose `order_id` matches none of the orders are dropped.
    pub fn attach_items(mut orders: Vec<Order>, items: Vec<OrderItem>) -> Vec<Order> {
        for item in items {
            if let Some(order) = orders.iter_mut().find(|o| o.id == item.order_id) {
                order.order_items.push(item);
            }
        }
        orders
    }
}
