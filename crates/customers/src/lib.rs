//! Customers domain module.
//!
//! This crate contains the customer read model decoded from backend
//! documents — pure data shaping, no IO.

pub mod customer;

pub use customer::{Customer, CustomerStatus};
