//! Repository trait for datastore health probing.

use crate::error::AppError;
use async_trait::async_trait;

/// Liveness probe for the backing datastore, used by `GET /health`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HealthRepository: Send + Sync {
    /// Executes a trivial round-trip query.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the datastore is unreachable.
    async fn ping(&self) -> Result<(), AppError>;
}
