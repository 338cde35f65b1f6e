//! `salonops-dashboard` — the admin dashboard's data layer.
//!
//! Two components live here:
//!
//! - the **orders board**: holds the latest known orders and customers,
//!   keeps derived counters consistent with that set, and wires a live
//!   subscription to stay fresh;
//! - the **expense summary**: derives a multi-axis expense/profit report
//!   from the products, services and bookings collections using a
//!   configurable heuristic cost model.
//!
//! Presentation renders this state; nothing here draws anything.

pub mod board;
pub mod expenses;
pub mod filter;
pub mod report;
pub mod stats;

#[cfg(test)]
mod integration_tests;

pub use board::{BoardError, ORDERS_FETCH_ERROR, OrdersBoard};
pub use expenses::{
    BranchRow, CategoryRow, CostModel, ExpenseBoard, ExpenseSummary, MONTHS, MonthRow,
};
pub use filter::{OrderFilter, filter_orders, payment_methods};
pub use report::{ReportPeriod, format_currency, render_report, report_file_name};
pub use stats::OrderStats;
