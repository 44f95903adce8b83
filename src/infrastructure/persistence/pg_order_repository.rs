//! PostgreSQL implementation of the order repository.
//!
//! Orders and their lines live in separate tables. Reads fetch the order rows
//! first and then all lines of those orders in one `= ANY($1)` query.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{NewOrderItem, Order, OrderDraft, OrderItem};
use crate::domain::repositories::{OrderRepository, Paging};
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    customer_id: Uuid,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: row.id,
            customer_id: row.customer_id,
            created_at: row.created_at,
            order_items: Vec::new(),
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderItemRow {
    order_id: Uuid,
    item_id: i32,
    quantity: i32,
}

impl From<OrderItemRow> for OrderItem {
    fn from(row: OrderItemRow) -> Self {
        Self {
            order_id: row.order_id,
            item_id: row.item_id,
            quantity: row.quantity,
        }
    }
}

/// PostgreSQL repository for orders.
pub struct PgOrderRepository {
    pool: Arc<PgPool>,
}

impl PgOrderRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Loads the lines of `rows` and returns complete orders.
    async fn with_items(&self, rows: Vec<OrderRow>) -> Result<Vec<Order>, AppError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = rows.iter().map(|r| r.id).collect();

        let items = sqlx::query_as::<_, OrderItemRow>(
            r#"
            SELECT order_id, item_id, quantity
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY item_id
            "#,
        )
        .bind(&ids)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(Order::attach_items(
            rows.into_iter().map(Order::from).collect(),
            items.into_iter().map(OrderItem::from).collect(),
        ))
    }
}

#[async_trait]
impl OrderRepository for PgOrderRepository {
    async fn list(&self, paging: Paging) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at
            FROM orders
            ORDER BY created_at, id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(paging.take)
        .bind(paging.skip)
        .fetch_all(self.pool.as_ref())
        .await?;

        self.with_items(rows).await
    }

    async fn list_for_customer(&self, customer_id: Uuid) -> Result<Vec<Order>, AppError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r#"
            SELECT id, customer_id, created_at
            FROM orders
            WHERE customer_id = $1
            ORDER BY created_at, id
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        self.with_items(rows).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let row = sqlx::query_as::<_, OrderRow>(
            "SELECT id, customer_id, created_at FROM orders WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        match row {
            Some(row) => Ok(self.with_items(vec![row]).await?.into_iter().next()),
            None => Ok(None),
        }
    }

    async fn upsert(&self, draft: OrderDraft) -> Result<Order, AppError> {
        let row = sqlx::query_as::<_, OrderRow>(
            r#"
            INSERT INTO orders (id, customer_id)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET customer_id = EXCLUDED.customer_id
            RETURNING id, customer_id, created_at
            "#,
        )
        .bind(draft.resolve_id())
        .bind(draft.customer_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        let id = row.id;
        self.with_items(vec![row])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AppError::internal("Order not readable after upsert", json!({ "id": id })))
    }

    async fn add_items(
        &self,
        order_id: Uuid,
        items: Vec<NewOrderItem>,
    ) -> Result<Order, AppError> {
        let (item_ids, quantities): (Vec<i32>, Vec<i32>) =
            items.iter().map(|i| (i.item_id, i.quantity)).unzip();

        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, item_id, quantity)
            SELECT $1, t.item_id, t.quantity
            FROM UNNEST($2::INT4[], $3::INT4[]) AS t(item_id, quantity)
            ON CONFLICT (order_id, item_id) DO UPDATE SET quantity = EXCLUDED.quantity
            "#,
        )
        .bind(order_id)
        .bind(&item_ids)
        .bind(&quantities)
        .execute(self.pool.as_ref())
        .await?;

        self.find_by_id(order_id).await?.ok_or_else(|| {
            AppError::internal("Order not readable after update", json!({ "id": order_id }))
        })
    }

    async fn remove_item(&self, order_id: Uuid, item_id: i32) -> Result<Option<Order>, AppError> {
        let result = sqlx::query("DELETE FROM order_items WHERE order_id = $1 AND item_id = $2")
            .bind(order_id)
            .bind(item_id)
            .execute(self.pool.as_ref())
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.find_by_id(order_id).await
    }
}
