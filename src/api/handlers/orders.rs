//! Handlers for order endpoints.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::json;

use crate::api::dto::order::{
    OrderItemPath, OrderItemsRequest, OrderPath, OrderRequest, PagingParams,
};
use crate::api::extract::{ValidatedJson, ValidatedPath, ValidatedQuery};
use crate::domain::entities::Order;
use crate::error::AppError;
use crate::state::AppState;

/// Lists a window of orders ordered by creation time.
///
/// # Endpoint
///
/// `GET /api/orders?take=10&skip=0`
///
/// # Query Parameters
///
/// - `take` - number of orders, greater than 0 (required)
/// - `skip` - orders to skip, not negative (required)
pub async fn list_orders_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PagingParams>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.order_service.list_orders(params.into()).await?;
    Ok(Json(orders))
}

/// Returns one order with its lines.
///
/// # Endpoint
///
/// `GET /api/orders/{id}`
///
/// # Errors
///
/// - `400` if `id` is not a UUID
/// - `404` "Order Not Found"
pub async fn get_order_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<OrderPath>,
) -> Result<Json<Order>, AppError> {
    let order = state.order_service.get_order(path.id).await?;
    Ok(Json(order))
}

/// Creates an order, or reassigns it when the body carries a known `id`.
///
/// # Endpoint
///
/// `POST /api/orders`
///
/// # Request Body
///
/// ```json
/// { "customerId": "6f1c1a2e-3f4b-4c5d-8e9f-0a1b2c3d4e5f" }
/// ```
pub async fn upsert_order_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<OrderRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    let order = state.order_service.upsert_order(payload.into()).await?;

    tracing::info!(order_id = %order.id, customer_id = %order.customer_id, "Order saved");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Adds lines to an order. Existing lines get the new quantity.
///
/// # Endpoint
///
/// `POST /api/orders/{id}/items`
///
/// # Request Body
///
/// ```json
/// [{ "orderId": "6f1c...", "itemId": 1, "quantity": 2 }]
/// ```
///
/// # Errors
///
/// - `400` on an empty array, invalid line or an `orderId` other than `{id}`
/// - `500` "Addition failed" for an unknown order or item
pub async fn add_order_items_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<OrderPath>,
    ValidatedJson(payload): ValidatedJson<OrderItemsRequest>,
) -> Result<(StatusCode, Json<Order>), AppError> {
    if !payload.all_for_order(path.id) {
        return Err(AppError::bad_request(
            "Order id mismatch",
            json!({ "orderId": path.id }),
        ));
    }

    let order = state
        .order_service
        .add_items(path.id, payload.into_lines())
        .await?;

    tracing::info!(order_id = %order.id, lines = order.order_items.len(), "Order items added");

    Ok((StatusCode::CREATED, Json(order)))
}

/// Removes one line from an order.
///
/// # Endpoint
///
/// `DELETE /api/orders/{id}/items/{item_id}`
///
/// # Errors
///
/// - `404` "Order or item Not Found"
pub async fn remove_order_item_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<OrderItemPath>,
) -> Result<Json<Order>, AppError> {
    let order = state
        .order_service
        .remove_item(path.id, path.item_id)
        .await?;
    Ok(Json(order))
}
