//! Repository trait for customers.

use crate::domain::entities::{Customer, CustomerDraft};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for customers.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCustomerRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Lists all customers ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<Customer>, AppError>;

    /// Finds a customer by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, AppError>;

    /// Case-insensitive substring search over name and email.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn search(&self, query: &str) -> Result<Vec<Customer>, AppError>;

    /// Creates the customer, or overwrites it when the id already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn upsert(&self, draft: CustomerDraft) -> Result<Customer, AppError>;
}
