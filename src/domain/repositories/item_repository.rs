//! Repository trait for catalogue items.

use crate::domain::entities::{Item, ItemDraft, ItemSummary};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for items.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgItemRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Lists `id` and `name` of every item ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list(&self) -> Result<Vec<ItemSummary>, AppError>;

    /// Finds an item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i32) -> Result<Option<Item>, AppError>;

    /// Inserts a new item and returns it with its generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, draft: ItemDraft) -> Result<Item, AppError>;

    /// Overwrites name and description of an existing item.
    ///
    /// Returns `Ok(None)` when no item has this id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn update(&self, id: i32, draft: ItemDraft) -> Result<Option<Item>, AppError>;

    /// Deletes an item and returns the deleted record.
    ///
    /// A "record not found" outcome is reported as `Ok(None)`; every other
    /// database error is returned as is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors, including foreign key
    /// violations when the item is still referenced by orders.
    async fn delete(&self, id: i32) -> Result<Option<Item>, AppError>;
}
