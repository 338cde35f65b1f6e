//! Derived order counters.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use salonops_orders::{Order, OrderStatus};

/// Counters derived from the in-memory order list.
///
/// Revenue counts **delivered** orders only; every other status contributes
/// nothing. `active_customers` is maintained by the board from the customer
/// map, not by [`OrderStats::compute`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct OrderStats {
    pub total: usize,
    pub pending: usize,
    pub confirmed: usize,
    pub processing: usize,
    pub shipped: usize,
    pub delivered: usize,
    pub cancelled: usize,
    pub refunded: usize,
    pub total_revenue: f64,
    pub today_orders: usize,
    pub active_customers: usize,
}

impl OrderStats {
    /// Pure computation over an order list.
    ///
    /// `today` is passed in (local calendar date) so callers and tests get
    /// deterministic results; [`today`] supplies the current one.
    pub fn compute(orders: &[Order], today: NaiveDate) -> Self {
        let mut stats = OrderStats {
            total: orders.len(),
            ..OrderStats::default()
        };

        for order in orders {
            match order.status {
                OrderStatus::Pending => stats.pending += 1,
                OrderStatus::Confirmed => stats.confirmed += 1,
                OrderStatus::Processing => stats.processing += 1,
                OrderStatus::Shipped => stats.shipped += 1,
                OrderStatus::Delivered => stats.delivered += 1,
                OrderStatus::Cancelled => stats.cancelled += 1,
                OrderStatus::Refunded => stats.refunded += 1,
            }

            if order.status == OrderStatus::Delivered {
                stats.total_revenue += order.total_amount;
            }

            if local_calendar_date(order.created_at) == today {
                stats.today_orders += 1;
            }
        }

        stats
    }

    /// The counter for one status.
    pub fn count_for(&self, status: OrderStatus) -> usize {
        match status {
            OrderStatus::Pending => self.pending,
            OrderStatus::Confirmed => self.confirmed,
            OrderStatus::Processing => self.processing,
            OrderStatus::Shipped => self.shipped,
            OrderStatus::Delivered => self.delivered,
            OrderStatus::Cancelled => self.cancelled,
            OrderStatus::Refunded => self.refunded,
        }
    }
}

/// A timestamp's calendar date in the local timezone.
pub fn local_calendar_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
