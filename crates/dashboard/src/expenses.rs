//! Expense/profit derivation across products, services and bookings.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, Utc};
use serde::Serialize;
use tracing::error;

use salonops_catalog::{Booking, Product, Service};
use salonops_store::{Direction, DocumentStore, Query, collections};

/// Calendar-year month labels, report order.
pub const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Heuristic cost ratios.
///
/// Services carry no recorded cost and completed bookings no cost
/// breakdown, so both are estimated as a share of price. The defaults are
/// the legacy 30%/40% business rule — a placeholder, not a derived
/// invariant, which is why they are configuration rather than constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostModel {
    /// Share of a service's listed price treated as its cost.
    pub service_cost_ratio: f64,
    /// Share of a completed booking's amount treated as its cost.
    pub booking_cost_ratio: f64,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            service_cost_ratio: 0.30,
            booking_cost_ratio: 0.40,
        }
    }
}

impl CostModel {
    pub fn service_cost(&self, service: &Service) -> f64 {
        service.price * self.service_cost_ratio
    }

    pub fn booking_cost(&self, booking: &Booking) -> f64 {
        booking.total_amount * self.booking_cost_ratio
    }
}

/// One month of the profit & loss breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRow {
    pub month: &'static str,
    pub products_cost: f64,
    pub services_cost: f64,
    pub appointments_cost: f64,
    pub total_cost: f64,
    pub revenue: f64,
    pub profit: f64,
}

/// Per-branch cost breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BranchRow {
    pub branch: String,
    pub products_cost: f64,
    pub services_cost: f64,
    pub appointments_cost: f64,
    pub total_cost: f64,
}

/// Per-category cost breakdown (products and services only).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryRow {
    pub category: String,
    pub products_cost: f64,
    pub services_cost: f64,
    pub total_cost: f64,
}

/// The derived expense/profit report.
///
/// Headline totals honor the branch filter; the dimensional breakdowns are
/// always computed over the full collections, so branch rows sum back to
/// the unfiltered totals.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ExpenseSummary {
    pub total_products_cost: f64,
    pub total_services_cost: f64,
    pub total_appointments_cost: f64,
    pub total_expenses: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    /// Percent; exactly 0 when revenue is 0.
    pub profit_margin: f64,
    pub month_wise: Vec<MonthRow>,
    pub branch_wise: Vec<BranchRow>,
    pub category_wise: Vec<CategoryRow>,
}

impl ExpenseSummary {
    /// Full recomputation from scratch — no incremental update.
    ///
    /// `branch` narrows the headline totals: products/services by listing,
    /// bookings via their service's branch list. A booking whose service is
    /// unmatched is silently excluded from branch attribution. `year` fixes
    /// the month buckets to one calendar year.
    pub fn compute(
        products: &[Product],
        services: &[Service],
        bookings: &[Booking],
        model: &CostModel,
        branch: Option<&str>,
        year: i32,
    ) -> Self {
        let service_by_id: HashMap<&str, &Service> =
            services.iter().map(|s| (s.id.as_str(), s)).collect();

        let filtered_products: Vec<&Product> = products
            .iter()
            .filter(|p| branch.is_none_or(|b| p.listed_at(b)))
            .collect();
        let filtered_services: Vec<&Service> = services
            .iter()
            .filter(|s| branch.is_none_or(|b| s.listed_at(b)))
            .collect();
        let filtered_bookings: Vec<&Booking> = bookings
            .iter()
            .filter(|b| match branch {
                None => true,
                Some(branch) => service_by_id
                    .get(b.service_id.as_str())
                    .is_some_and(|s| s.listed_at(branch)),
            })
            .collect();

        let total_products_cost: f64 = filtered_products
            .iter()
            .map(|p| p.inventory_cost())
            .sum();
        let total_services_cost: f64 = filtered_services
            .iter()
            .map(|s| model.service_cost(s))
            .sum();

        let completed: Vec<&Booking> = filtered_bookings
            .iter()
            .copied()
            .filter(|b| b.status.is_completed())
            .collect();
        let total_appointments_cost: f64 = completed.iter().map(|b| model.booking_cost(b)).sum();
        let total_revenue: f64 = completed.iter().map(|b| b.total_amount).sum();

        let total_expenses = total_products_cost + total_services_cost + total_appointments_cost;
        let total_profit = total_revenue - total_expenses;
        let profit_margin = if total_revenue > 0.0 {
            total_profit / total_revenue * 100.0
        } else {
            0.0
        };

        let month_wise = month_rows(
            bookings,
            model,
            year,
            total_products_cost,
            total_services_cost,
        );
        let branch_wise = branch_rows(products, services, bookings, &service_by_id, model);
        let category_wise = category_rows(products, services, model);

        Self {
            total_products_cost,
            total_services_cost,
            total_appointments_cost,
            total_expenses,
            total_revenue,
            total_profit,
            profit_margin,
            month_wise,
            branch_wise,
            category_wise,
        }
    }
}

/// Month buckets for one calendar year.
///
/// Bookings are bucketed by creation time (local calendar); products and
/// services cost is an even one-twelfth **allocation** per month, not an
/// attribution to actual purchase dates.
fn month_rows(
    bookings: &[Booking],
    model: &CostModel,
    year: i32,
    total_products_cost: f64,
    total_services_cost: f64,
) -> Vec<MonthRow> {
    let monthly_products = total_products_cost / 12.0;
    let monthly_services = total_services_cost / 12.0;

    MONTHS
        .iter()
        .copied()
        .enumerate()
        .map(|(index, month)| {
            let month_no = index as u32 + 1;
            let month_bookings: Vec<&Booking> = bookings
                .iter()
                .filter(|b| b.status.is_completed() && in_month(b.created_at, year, month_no))
                .collect();

            let appointments_cost: f64 =
                month_bookings.iter().map(|b| model.booking_cost(b)).sum();
            let revenue: f64 = month_bookings.iter().map(|b| b.total_amount).sum();
            let total_cost = monthly_products + monthly_services + appointments_cost;
            let profit = revenue - total_cost;

            MonthRow {
                month,
                products_cost: round2(monthly_products),
                services_cost: round2(monthly_services),
                appointments_cost: round2(appointments_cost),
                total_cost: round2(total_cost),
                revenue: round2(revenue),
                profit: round2(profit),
            }
        })
        .collect()
}

fn branch_rows(
    products: &[Product],
    services: &[Service],
    bookings: &[Booking],
    service_by_id: &HashMap<&str, &Service>,
    model: &CostModel,
) -> Vec<BranchRow> {
    branch_union(products, services)
        .into_iter()
        .map(|branch| {
            let products_cost: f64 = products
                .iter()
                .filter(|p| p.listed_at(&branch))
                .map(|p| p.inventory_cost())
                .sum();
            let services_cost: f64 = services
                .iter()
                .filter(|s| s.listed_at(&branch))
                .map(|s| model.service_cost(s))
                .sum();
            let appointments_cost: f64 = bookings
                .iter()
                .filter(|b| {
                    b.status.is_completed()
                        && service_by_id
                            .get(b.service_id.as_str())
                            .is_some_and(|s| s.listed_at(&branch))
                })
                .map(|b| model.booking_cost(b))
                .sum();
            let total_cost = products_cost + services_cost + appointments_cost;

            BranchRow {
                branch,
                products_cost: round2(products_cost),
                services_cost: round2(services_cost),
                appointments_cost: round2(appointments_cost),
                total_cost: round2(total_cost),
            }
        })
        .collect()
}

fn category_rows(
    products: &[Product],
    services: &[Service],
    model: &CostModel,
) -> Vec<CategoryRow> {
    let mut categories: Vec<String> = Vec::new();
    for category in products
        .iter()
        .map(|p| p.category.as_str())
        .chain(services.iter().map(|s| s.category.as_str()))
    {
        if !category.is_empty() && !categories.iter().any(|c| c == category) {
            categories.push(category.to_string());
        }
    }

    categories
        .into_iter()
        .map(|category| {
            let products_cost: f64 = products
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.inventory_cost())
                .sum();
            let services_cost: f64 = services
                .iter()
                .filter(|s| s.category == category)
                .map(|s| model.service_cost(s))
                .sum();

            CategoryRow {
                category,
                products_cost: round2(products_cost),
                services_cost: round2(services_cost),
                total_cost: round2(products_cost + services_cost),
            }
        })
        .collect()
}

/// Union of product/service branch names, first-seen order.
fn branch_union(products: &[Product], services: &[Service]) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for branch in products
        .iter()
        .flat_map(|p| p.branch_names.iter())
        .chain(services.iter().flat_map(|s| s.branch_names.iter()))
    {
        if !branches.iter().any(|b| b == branch) {
            branches.push(branch.clone());
        }
    }
    branches
}

fn in_month(ts: DateTime<Utc>, year: i32, month: u32) -> bool {
    let local = ts.with_timezone(&Local);
    local.year() == year && local.month() == month
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Fetches the three expense collections and keeps a recomputed summary.
///
/// The collections are fetched independently; a failure in one is logged
/// and leaves that collection at its previous contents while the others
/// refresh — the resulting report silently skews rather than failing. Any
/// change to the data, the branch filter or the cost model triggers a full
/// recomputation.
#[derive(Debug)]
pub struct ExpenseBoard<S> {
    store: S,
    model: CostModel,
    products: Vec<Product>,
    services: Vec<Service>,
    bookings: Vec<Booking>,
    branch: Option<String>,
    summary: ExpenseSummary,
}

impl<S: DocumentStore> ExpenseBoard<S> {
    pub fn new(store: S) -> Self {
        Self::with_cost_model(store, CostModel::default())
    }

    pub fn with_cost_model(store: S, model: CostModel) -> Self {
        Self {
            store,
            model,
            products: Vec::new(),
            services: Vec::new(),
            bookings: Vec::new(),
            branch: None,
            summary: ExpenseSummary::default(),
        }
    }

    /// Refresh all three collections, then recompute.
    pub fn refresh_all(&mut self) {
        self.refresh_products();
        self.refresh_services();
        self.refresh_bookings();
        self.recompute();
    }

    fn refresh_products(&mut self) {
        let query = Query::collection(collections::PRODUCTS).where_eq("status", "active");
        match self.store.get_all(&query) {
            Ok(docs) => self.products = docs.iter().map(Product::from_document).collect(),
            Err(e) => error!(error = %e, "failed to fetch products"),
        }
    }

    fn refresh_services(&mut self) {
        let query = Query::collection(collections::SERVICES).where_eq("status", "active");
        match self.store.get_all(&query) {
            Ok(docs) => self.services = docs.iter().map(Service::from_document).collect(),
            Err(e) => error!(error = %e, "failed to fetch services"),
        }
    }

    fn refresh_bookings(&mut self) {
        let query =
            Query::collection(collections::BOOKINGS).order_by("createdAt", Direction::Descending);
        match self.store.get_all(&query) {
            Ok(docs) => self.bookings = docs.iter().map(Booking::from_document).collect(),
            Err(e) => error!(error = %e, "failed to fetch bookings"),
        }
    }

    /// `None` means all branches.
    pub fn set_branch_filter(&mut self, branch: Option<String>) {
        self.branch = branch;
        self.recompute();
    }

    pub fn set_cost_model(&mut self, model: CostModel) {
        self.model = model;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.summary = ExpenseSummary::compute(
            &self.products,
            &self.services,
            &self.bookings,
            &self.model,
            self.branch.as_deref(),
            Local::now().year(),
        );
    }

    pub fn summary(&self) -> &ExpenseSummary {
        &self.summary
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Branch names available to filter on.
    pub fn branch_options(&self) -> Vec<String> {
        branch_union(&self.products, &self.services)
    }
}
