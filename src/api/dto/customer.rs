//! DTOs for customer endpoints.

use crate::api::dto::trim::{trimmed, trimmed_option};
use crate::domain::entities::{Customer, CustomerDraft};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use uuid::Uuid;
use validator::Validate;

/// Digits with optional leading `+`, spaces, dashes and parentheses.
static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ()\-]{5,20}$").unwrap());

/// Body of `POST /api/customers`. An `id` updates that customer if it exists.
///
/// Strings are trimmed before validation; blank optional fields become absent.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRequest {
    pub id: Option<Uuid>,

    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(deserialize_with = "trimmed")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(regex(path = *PHONE_REGEX, message = "Invalid phone number"))]
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: Option<String>,
}

impl From<CustomerRequest> for CustomerDraft {
    fn from(req: CustomerRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

/// Entry of the customer list.
#[derive(Debug, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<Customer> for CustomerSummary {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CustomerPath {
    pub id: Uuid,
}

/// Search term, trimmed before its length is checked.
#[derive(Debug, Deserialize, Validate)]
pub struct SearchPath {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Query must be 1-255 characters"))]
    pub query: String,
}
