//! Catalog domain module: products, services and bookings.
//!
//! These are the three collections the expense calculator reads. Pure data
//! shaping, no IO.

pub mod booking;
pub mod product;
pub mod service;

pub use booking::{Booking, BookingStatus};
pub use product::{ListingStatus, Product};
pub use service::Service;
