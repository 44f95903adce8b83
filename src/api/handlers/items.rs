//! Handlers for item endpoints.
//!
//! List and detail negotiate JSON or XML from `Accept`, including their error
//! bodies. Writes always answer in JSON.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::item::{ItemPath, ItemRequest, ItemView};
use crate::api::extract::{ValidatedJson, ValidatedPath};
use crate::api::negotiate::{Negotiated, NegotiatedError, ResponseFormat};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::RequestOrigin;

/// Lists all items with their image URLs.
///
/// # Endpoint
///
/// `GET /api/items`
///
/// # Caching
///
/// The list comes from the items cache when present. Image URLs are added
/// afterwards from the request origin, so cached entries are origin-free.
///
/// # Response
///
/// ```xml
/// <?xml version="1.0" encoding="UTF-8"?>
/// <items><item><id>1</id><name>Bike</name><imageUrl>http://host/images/1.jpg</imageUrl></item></items>
/// ```
pub async fn list_items_handler(
    State(state): State<AppState>,
    format: ResponseFormat,
    origin: RequestOrigin,
) -> Result<Negotiated<Vec<ItemView>>, NegotiatedError> {
    let items = state
        .item_service
        .list_items()
        .await
        .map_err(|e| format.error(e))?;

    let views = items
        .into_iter()
        .map(|summary| ItemView::from_summary(summary, &origin))
        .collect();

    Ok(Negotiated::ok(format, views))
}

/// Returns one item.
///
/// # Endpoint
///
/// `GET /api/items/{id}`
///
/// # Errors
///
/// - `400` if `id` is not a positive integer
/// - `404` "Item Not Found"
pub async fn get_item_handler(
    State(state): State<AppState>,
    format: ResponseFormat,
    origin: RequestOrigin,
    path: Result<ValidatedPath<ItemPath>, AppError>,
) -> Result<Negotiated<ItemView>, NegotiatedError> {
    let ValidatedPath(path) = path.map_err(|e| format.error(e))?;

    let item = state
        .item_service
        .get_item(path.id)
        .await
        .map_err(|e| format.error(e))?;

    Ok(Negotiated::ok(format, ItemView::from_item(item, &origin)))
}

/// Creates an item.
///
/// # Endpoint
///
/// `POST /api/items`
///
/// # Request Body
///
/// ```json
/// { "name": "Bike", "description": "Red, 21 gears" }
/// ```
///
/// # Errors
///
/// - `400` on validation failure
/// - `500` "Creation failed"
pub async fn create_item_handler(
    State(state): State<AppState>,
    origin: RequestOrigin,
    ValidatedJson(payload): ValidatedJson<ItemRequest>,
) -> Result<(StatusCode, Json<ItemView>), AppError> {
    let item = state.item_service.create_item(payload.into()).await?;

    tracing::info!(item_id = item.id, "Item created");

    Ok((StatusCode::CREATED, Json(ItemView::from_item(item, &origin))))
}

/// Overwrites an existing item.
///
/// # Endpoint
///
/// `PUT /api/items/{id}`
///
/// # Errors
///
/// - `400` on validation failure
/// - `404` "Item Not Found"
pub async fn update_item_handler(
    State(state): State<AppState>,
    origin: RequestOrigin,
    ValidatedPath(path): ValidatedPath<ItemPath>,
    ValidatedJson(payload): ValidatedJson<ItemRequest>,
) -> Result<Json<ItemView>, AppError> {
    let item = state
        .item_service
        .update_item(path.id, payload.into())
        .await?;

    tracing::info!(item_id = item.id, "Item updated");

    Ok(Json(ItemView::from_item(item, &origin)))
}

/// Deletes an item and returns the deleted record.
///
/// # Endpoint
///
/// `DELETE /api/items/{id}`
///
/// # Errors
///
/// - `404` "Item Not Found"
pub async fn delete_item_handler(
    State(state): State<AppState>,
    origin: RequestOrigin,
    ValidatedPath(path): ValidatedPath<ItemPath>,
) -> Result<Json<ItemView>, AppError> {
    let item = state.item_service.delete_item(path.id).await?;

    tracing::info!(item_id = item.id, "Item deleted");

    Ok(Json(ItemView::from_item(item, &origin)))
}
