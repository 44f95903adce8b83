//! PostgreSQL implementation of the customer repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{Customer, CustomerDraft};
use crate::domain::repositories::CustomerRepository;
use crate::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: Uuid,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<CustomerRow> for Customer {
    fn from(row: CustomerRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for customers.
pub struct PgCustomerRepository {
    pool: Arc<PgPool>,
}

impl PgCustomerRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Builds an `ILIKE` pattern matching `query` anywhere, with LIKE
/// metacharacters in the query taken literally.
fn contains_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn list(&self) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, phone, address, created_at
            FROM customers
            ORDER BY name, id
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, phone, address, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Customer::from))
    }

    async fn search(&self, query: &str) -> Result<Vec<Customer>, AppError> {
        let rows = sqlx::query_as::<_, CustomerRow>(
            r#"
            SELECT id, name, email, phone, address, created_at
            FROM customers
            WHERE name ILIKE $1 OR email ILIKE $1
            ORDER BY name, id
            "#,
        )
        .bind(contains_pattern(query))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Customer::from).collect())
    }

    async fn upsert(&self, draft: CustomerDraft) -> Result<Customer, AppError> {
        let row = sqlx::query_as::<_, CustomerRow>(
            r#"
            INSERT INTO customers (id, name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE SET
                name    = EXCLUDED.name,
                email   = EXCLUDED.email,
                phone   = EXCLUDED.phone,
                address = EXCLUDED.address
            RETURNING id, name, email, phone, address, created_at
            "#,
        )
        .bind(draft.resolve_id())
        .bind(draft.name)
        .bind(draft.email)
        .bind(draft.phone)
        .bind(draft.address)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }
}
