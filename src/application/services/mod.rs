//! Business logic services for the application layer.

pub mod customer_service;
pub mod item_service;
pub mod order_service;

pub use customer_service::CustomerService;
pub use item_service::ItemService;
pub use order_service::OrderService;
