//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Customer`] - A customer placing orders
//! - [`Item`] - A catalogue item that can be ordered
//! - [`Order`] - An order owned by a customer, holding [`OrderItem`] lines
//!
//! Creation/update inputs live next to each entity (`CustomerDraft`,
//! `ItemDraft`, `OrderDraft`, `NewOrderItem`).

pub mod customer;
pub mod item;
pub mod order;

pub use customer::{Customer, CustomerDraft};
pub use item::{Item, ItemDraft, ItemSummary};
pub use order::{NewOrderItem, Order, OrderDraft, OrderItem};
