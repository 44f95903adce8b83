//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod customers;
pub mod health;
pub mod items;
pub mod orders;

pub use customers::{
    customer_orders_handler, get_customer_handler, list_customers_handler,
    search_customers_handler, upsert_customer_handler,
};
pub use health::health_handler;
pub use items::{
    create_item_handler, delete_item_handler, get_item_handler, list_items_handler,
    update_item_handler,
};
pub use orders::{
    add_order_items_handler, get_order_handler, list_orders_handler, remove_order_item_handler,
    upsert_order_handler,
};
