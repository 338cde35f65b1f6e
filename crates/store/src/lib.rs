//! `salonops-store` — boundary to the hosted document database.
//!
//! The hosted backend owns every record; this crate only models the generic
//! query surface the dashboard consumes: snapshot reads (filter-by-field,
//! order-by-field), point gets, partial field updates, document creation,
//! and live subscriptions that redeliver a fresh snapshot on every change.
//!
//! `InMemoryStore` is the test/dev implementation; production wires an
//! adapter over the hosted service.

pub mod collections;
pub mod document;
pub mod in_memory;
pub mod query;
pub mod store;
pub mod subscription;

pub use document::Document;
pub use in_memory::InMemoryStore;
pub use query::{Direction, Query};
pub use store::{DocumentStore, StoreError};
pub use subscription::Subscription;
