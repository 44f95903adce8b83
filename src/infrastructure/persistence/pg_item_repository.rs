//! PostgreSQL implementation of the item repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Item, ItemDraft, ItemSummary};
use crate::domain::repositories::ItemRepository;
use crate::error::AppError;
use crate::utils::db_error::is_record_not_found;

#[derive(Debug, sqlx::FromRow)]
struct ItemRow {
    id: i32,
    name: String,
    description: Option<String>,
}

impl From<ItemRow> for Item {
    fn from(row: ItemRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ItemSummaryRow {
    id: i32,
    name: String,
}

/// PostgreSQL repository for catalogue items.
pub struct PgItemRepository {
    pool: Arc<PgPool>,
}

impl PgItemRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ItemRepository for PgItemRepository {
    async fn list(&self) -> Result<Vec<ItemSummary>, AppError> {
        let rows = sqlx::query_as::<_, ItemSummaryRow>("SELECT id, name FROM items ORDER BY id")
            .fetch_all(self.pool.as_ref())
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| ItemSummary {
                id: r.id,
                name: r.name,
            })
            .collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Item>, AppError> {
        let row = sqlx::query_as::<_, ItemRow>(
            "SELECT id, name, description FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Item::from))
    }

    async fn create(&self, draft: ItemDraft) -> Result<Item, AppError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            INSERT INTO items (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(draft.name)
        .bind(draft.description)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, id: i32, draft: ItemDraft) -> Result<Option<Item>, AppError> {
        let row = sqlx::query_as::<_, ItemRow>(
            r#"
            UPDATE items SET
                name        = $2,
                description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(draft.name)
        .bind(draft.description)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Item::from))
    }

    async fn delete(&self, id: i32) -> Result<Option<Item>, AppError> {
        let result = sqlx::query_as::<_, ItemRow>(
            "DELETE FROM items WHERE id = $1 RETURNING id, name, description",
        )
        .bind(id)
        .fetch_one(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(Some(row.into())),
            Err(e) if is_record_not_found(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
