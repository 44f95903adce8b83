//! PostgreSQL repository implementations.
//!
//! Concrete implementations of the domain repository traits using SQLx.
//! Queries are checked at runtime and decoded into `sqlx::FromRow` row types
//! that convert into domain entities.
//!
//! # Repositories
//!
//! - [`PgCustomerRepository`] - Customer lookup, search and upsert
//! - [`PgItemRepository`] - Item CRUD
//! - [`PgOrderRepository`] - Orders and order lines
//! - [`PgHealthRepository`] - Liveness probe

pub mod pg_customer_repository;
pub mod pg_health_repository;
pub mod pg_item_repository;
pub mod pg_order_repository;

pub use pg_customer_repository::PgCustomerRepository;
pub use pg_health_repository::PgHealthRepository;
pub use pg_item_repository::PgItemRepository;
pub use pg_order_repository::PgOrderRepository;
