//! The orders aggregation board.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, error};

use salonops_core::{CustomerId, OrderId};
use salonops_customers::Customer;
use salonops_orders::{Order, OrderStatus};
use salonops_store::{
    Direction, Document, DocumentStore, Query, StoreError, Subscription, collections,
};

use crate::stats::{self, OrderStats};

/// User-facing message recorded when the orders snapshot cannot be loaded.
pub const ORDERS_FETCH_ERROR: &str = "Failed to load orders. Please try again.";

/// Failure surfaced to the caller of a board write operation.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Holds the latest known orders and customers and keeps the derived
/// counters consistent with that set.
///
/// The board is an explicit state container with a single owner: every
/// mutation goes through one of the methods below, called from the UI task.
/// Refreshes do **not** cancel one another — when two overlap, whichever
/// snapshot is applied last wins, which is not necessarily the newest.
/// There is likewise no at-most-once guarantee for status updates to the
/// same order issued from two sessions; the backend's last write wins.
#[derive(Debug)]
pub struct OrdersBoard<S> {
    store: S,
    orders: Vec<Order>,
    customers: HashMap<CustomerId, Customer>,
    stats: OrderStats,
    last_error: Option<String>,
}

impl<S: DocumentStore> OrdersBoard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            orders: Vec::new(),
            customers: HashMap::new(),
            stats: OrderStats::default(),
            last_error: None,
        }
    }

    fn orders_query() -> Query {
        Query::collection(collections::ORDERS).order_by("createdAt", Direction::Descending)
    }

    /// Replace the order list with a fresh backend snapshot (newest first),
    /// recompute stats, then refresh customers.
    ///
    /// On failure the generic user-facing message is recorded and prior
    /// state is left untouched; the transport error is only logged.
    pub fn refresh_orders(&mut self) {
        match self.store.get_all(&Self::orders_query()) {
            Ok(documents) => {
                self.last_error = None;
                self.replace_orders(&documents);
                self.refresh_customers();
            }
            Err(e) => {
                error!(error = %e, "failed to fetch orders");
                self.last_error = Some(ORDERS_FETCH_ERROR.to_string());
            }
        }
    }

    /// Replace the customer map and recompute the active-customer count.
    ///
    /// Failures are logged and swallowed; the order stats stay intact.
    pub fn refresh_customers(&mut self) {
        let query =
            Query::collection(collections::CUSTOMERS).order_by("createdAt", Direction::Descending);
        match self.store.get_all(&query) {
            Ok(documents) => {
                self.customers = documents
                    .iter()
                    .map(|doc| {
                        let customer = Customer::from_document(doc);
                        (customer.uid.clone(), customer)
                    })
                    .collect();
                self.stats.active_customers = self
                    .customers
                    .values()
                    .filter(|c| c.status.is_active())
                    .count();
            }
            Err(e) => error!(error = %e, "failed to fetch customers"),
        }
    }

    /// Write the new status (plus `updatedAt`) to the backend, then mirror
    /// it into the in-memory list and recompute stats.
    ///
    /// Errors propagate to the caller; there is no rollback of a partial
    /// remote write and no retry.
    pub fn update_order_status(
        &mut self,
        order_id: &OrderId,
        new_status: OrderStatus,
    ) -> Result<(), BoardError> {
        let updated_at = Utc::now();
        self.store.update_fields(
            collections::ORDERS,
            order_id.as_str(),
            json!({
                "status": new_status.as_str(),
                "updatedAt": updated_at.to_rfc3339(),
            }),
        )?;

        if let Some(order) = self.orders.iter_mut().find(|o| &o.id == order_id) {
            order.status = new_status;
            order.updated_at = updated_at;
        }
        self.recompute_stats();
        Ok(())
    }

    /// Subscribe to live order changes.
    ///
    /// Feed deliveries back through [`OrdersBoard::pump`] (or
    /// [`OrdersBoard::apply_snapshot`]); dropping the subscription cancels
    /// it. Subscription errors never reach callers — a lost channel simply
    /// stops delivering.
    pub fn watch(&self) -> Subscription<Vec<Document>> {
        self.store.watch(&Self::orders_query())
    }

    /// Apply one delivered snapshot: replace the order list, recompute
    /// stats, refresh customers.
    pub fn apply_snapshot(&mut self, documents: &[Document]) {
        self.replace_orders(documents);
        self.refresh_customers();
    }

    /// Drain every pending delivery from `subscription`, applying each in
    /// arrival order. Returns how many snapshots were applied.
    pub fn pump(&mut self, subscription: &Subscription<Vec<Document>>) -> usize {
        let mut applied = 0;
        while let Ok(documents) = subscription.try_recv() {
            self.apply_snapshot(&documents);
            applied += 1;
        }
        if applied > 0 {
            debug!(applied, "applied live order snapshots");
        }
        applied
    }

    fn replace_orders(&mut self, documents: &[Document]) {
        self.orders = documents.iter().map(Order::from_document).collect();
        self.recompute_stats();
    }

    fn recompute_stats(&mut self) {
        // The active-customer count comes from the customer map, not the
        // order list; keep it across order-only recomputations.
        let active_customers = self.stats.active_customers;
        self.stats = OrderStats::compute(&self.orders, stats::today());
        self.stats.active_customers = active_customers;
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn customers(&self) -> &HashMap<CustomerId, Customer> {
        &self.customers
    }

    /// Customer lookup for an order; absence is tolerated.
    pub fn customer(&self, customer_id: &CustomerId) -> Option<&Customer> {
        self.customers.get(customer_id)
    }

    pub fn stats(&self) -> &OrderStats {
        &self.stats
    }

    /// The user-facing message from the most recent failed orders fetch.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
