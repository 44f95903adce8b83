//! Application layer services.
//!
//! Services orchestrate repository calls and translate absence or write
//! failures into [`crate::error::AppError`] values. HTTP handlers only talk
//! to services.
//!
//! # Available Services
//!
//! - [`services::customer_service::CustomerService`] - Customers and their orders
//! - [`services::item_service::ItemService`] - Items and the cached items list
//! - [`services::order_service::OrderService`] - Orders and order lines

pub mod services;
