//! DTOs for item endpoints.
//!
//! [`ItemView`] is the outward representation in both JSON and XML and carries
//! an absolute `imageUrl` computed per request.

use crate::api::dto::trim::{trimmed, trimmed_option};
use crate::api::negotiate::{XmlDocument, render_xml};
use crate::domain::entities::{Item, ItemDraft, ItemSummary};
use crate::error::AppError;
use crate::utils::request_origin::RequestOrigin;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /api/items` and `PUT /api/items/{id}`.
///
/// Strings are trimmed while deserializing, so the length rules see the
/// stored value. A blank description is dropped.
#[derive(Debug, Deserialize, Validate)]
pub struct ItemRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 1, max = 255, message = "Name must be 1-255 characters"))]
    pub name: String,

    #[serde(default, deserialize_with = "trimmed_option")]
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
}

impl From<ItemRequest> for ItemDraft {
    fn from(req: ItemRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct ItemPath {
    #[validate(range(min = 1, message = "Item id must be positive"))]
    pub id: i32,
}

/// Item as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub id: i32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub image_url: String,
}

impl ItemView {
    pub fn from_item(item: Item, origin: &RequestOrigin) -> Self {
        Self {
            image_url: origin.image_url(item.id),
            id: item.id,
            name: item.name,
            description: item.description,
        }
    }

    pub fn from_summary(summary: ItemSummary, origin: &RequestOrigin) -> Self {
        Self {
            image_url: origin.image_url(summary.id),
            id: summary.id,
            name: summary.name,
            description: None,
        }
    }
}

impl XmlDocument for ItemView {
    fn to_xml(&self) -> Result<String, AppError> {
        render_xml("item", self)
    }
}

/// `<items>` document with one `<item>` per entry.
#[derive(Serialize)]
struct ItemsDocument<'a> {
    item: &'a [ItemView],
}

impl XmlDocument for Vec<ItemView> {
    fn to_xml(&self) -> Result<String, AppError> {
        render_xml("items", &ItemsDocument { item: self })
    }
}
