//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern and are
//! implemented by concrete repositories in the infrastructure layer.
//!
//! # Available Repositories
//!
//! - [`CustomerRepository`] - Customer lookup, search and upsert
//! - [`ItemRepository`] - Item CRUD
//! - [`OrderRepository`] - Orders and their lines
//! - [`HealthRepository`] - Datastore liveness probe
//!
//! # Testing
//!
//! Mock implementations are generated via `mockall` for unit tests. See
//! `tests/repository_*.rs` for tests against PostgreSQL.

pub mod customer_repository;
pub mod health_repository;
pub mod item_repository;
pub mod order_repository;

pub use customer_repository::CustomerRepository;
pub use health_repository::HealthRepository;
pub use item_repository::ItemRepository;
pub use order_repository::{OrderRepository, Paging};

#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
#[cfg(test)]
pub use health_repository::MockHealthRepository;
#[cfg(test)]
pub use item_repository::MockItemRepository;
#[cfg(test)]
pub use order_repository::MockOrderRepository;
