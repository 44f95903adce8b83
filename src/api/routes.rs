//! API route configuration.

use crate::api::handlers::{
    add_order_items_handler, create_item_handler, customer_orders_handler, delete_item_handler,
    get_customer_handler, get_item_handler, get_order_handler, list_customers_handler,
    list_items_handler, list_orders_handler, remove_order_item_handler, search_customers_handler,
    update_item_handler, upsert_customer_handler, upsert_order_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// All API routes, nested under `/api` by the top-level router.
///
/// # Endpoints
///
/// - `GET    /customers`                      - List customers
/// - `POST   /customers`                      - Create or update a customer
/// - `GET    /customers/{id}`                 - Customer detail
/// - `GET    /customers/{id}/orders`          - Orders of a customer
/// - `GET    /customers/search/{query}`       - Search customers by name or email
/// - `GET    /items`                          - List items (JSON or XML)
/// - `POST   /items`                          - Create an item
/// - `GET    /items/{id}`                     - Item detail (JSON or XML)
/// - `PUT    /items/{id}`                     - Update an item
/// - `DELETE /items/{id}`                     - Delete an item
/// - `GET    /orders?take=&skip=`             - List a window of orders
/// - `POST   /orders`                         - Create or update an order
/// - `GET    /orders/{id}`                    - Order detail
/// - `POST   /orders/{id}/items`              - Add order lines
/// - `DELETE /orders/{id}/items/{item_id}`    - Remove an order line
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/customers",
            get(list_customers_handler).post(upsert_customer_handler),
        )
        .route("/customers/search/{query}", get(search_customers_handler))
        .route("/customers/{id}", get(get_customer_handler))
        .route("/customers/{id}/orders", get(customer_orders_handler))
        .route("/items", get(list_items_handler).post(create_item_handler))
        .route(
            "/items/{id}",
            get(get_item_handler)
                .put(update_item_handler)
                .delete(delete_item_handler),
        )
        .route(
            "/orders",
            get(list_orders_handler).post(upsert_order_handler),
        )
        .route("/orders/{id}", get(get_order_handler))
        .route("/orders/{id}/items", post(add_order_items_handler))
        .route(
            "/orders/{id}/items/{item_id}",
            delete(remove_order_item_handler),
        )
}
