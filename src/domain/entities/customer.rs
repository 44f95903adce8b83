//! Domain entity representing a customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A customer who places orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or updating a customer.
///
/// When `id` is `None` a fresh id is generated, otherwise the record with that
/// id is created or overwritten.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerDraft {
    pub id: Option<Uuid>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl CustomerDraft {
    /// Returns the id to upsert under, generating a v4 UUID when absent.
    pub fn resolve_id(&self) -> Uuid {
        self.id.unwrap_or_else(Uuid::new_v4)
    }
}
