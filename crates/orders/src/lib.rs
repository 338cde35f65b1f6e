//! Orders domain module.
//!
//! This crate contains the product-order read model and its status
//! lifecycle — pure data shaping, no IO, no HTTP, no storage.

pub mod order;

pub use order::{DEFAULT_ITEM_IMAGE, Order, OrderItem, OrderStatus};
