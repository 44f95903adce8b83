//! Handlers for customer endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::customer::{CustomerPath, CustomerRequest, CustomerSummary, SearchPath};
use crate::api::extract::{ValidatedJson, ValidatedPath};
use crate::domain::entities::{Customer, Order};
use crate::error::AppError;
use crate::state::AppState;

/// Lists all customers.
///
/// # Endpoint
///
/// `GET /api/customers`
///
/// # Response
///
/// ```json
/// [{ "id": "6f1c...", "name": "Ada Lovelace", "email": "ada@example.com" }]
/// ```
pub async fn list_customers_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    let customers = state.customer_service.list_customers().await?;

    Ok(Json(customers.into_iter().map(CustomerSummary::from).collect()))
}

/// Returns one customer.
///
/// # Endpoint
///
/// `GET /api/customers/{id}`
///
/// # Errors
///
/// - `400` if `id` is not a UUID
/// - `404` "Customer Not Found"
pub async fn get_customer_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<CustomerPath>,
) -> Result<Json<Customer>, AppError> {
    let customer = state.customer_service.get_customer(path.id).await?;
    Ok(Json(customer))
}

/// Lists the orders of a customer, empty when there are none.
///
/// # Endpoint
///
/// `GET /api/customers/{id}/orders`
pub async fn customer_orders_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<CustomerPath>,
) -> Result<Json<Vec<Order>>, AppError> {
    let orders = state.customer_service.orders_for_customer(path.id).await?;
    Ok(Json(orders))
}

/// Case-insensitive substring search on name and email.
///
/// # Endpoint
///
/// `GET /api/customers/search/{query}`
///
/// # Errors
///
/// - `400` if the query is blank
/// - `404` "No Customers Found" when nothing matches
pub async fn search_customers_handler(
    State(state): State<AppState>,
    ValidatedPath(path): ValidatedPath<SearchPath>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let customers = state
        .customer_service
        .search_customers(&path.query)
        .await?;
    Ok(Json(customers))
}

/// Creates a customer, or updates it when the body carries a known `id`.
///
/// # Endpoint
///
/// `POST /api/customers`
///
/// # Request Body
///
/// ```json
/// { "name": "Ada Lovelace", "email": "ada@example.com", "phone": "+44 20 7946 0958" }
/// ```
///
/// # Errors
///
/// - `400` on validation failure
/// - `500` "Creation failed"
pub async fn upsert_customer_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<CustomerRequest>,
) -> Result<(StatusCode, Json<Customer>), AppError> {
    let customer = state.customer_service.upsert_customer(payload.into()).await?;

    tracing::info!(customer_id = %customer.id, "Customer saved");

    Ok((StatusCode::CREATED, Json(customer)))
}
