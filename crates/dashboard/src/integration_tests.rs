//! Integration tests for the full dashboard data path.
//!
//! Tests: store → orders board → live subscription, and
//! store → expense board → report.

use chrono::{Datelike, Utc};
use serde_json::{Value as JsonValue, json};

use salonops_core::OrderId;
use salonops_orders::OrderStatus;
use salonops_store::{
    Document, DocumentStore, InMemoryStore, Query, StoreError, Subscription, collections,
};

use crate::board::OrdersBoard;
use crate::expenses::ExpenseBoard;
use crate::report::{ReportPeriod, render_report};

fn init_logging() {
    salonops_observability::init();
}

fn order_doc(status: &str, amount: f64) -> JsonValue {
    json!({
        "customerId": "uid-1",
        "customerName": "Amira Khan",
        "customerEmail": "amira@example.com",
        "status": status,
        "totalAmount": amount,
        "createdAt": Utc::now().to_rfc3339(),
    })
}

fn seed_expense_fixtures(store: &InMemoryStore) {
    store.seed(
        collections::PRODUCTS,
        "p1",
        json!({
            "name": "Argan Oil",
            "cost": 10.0,
            "totalStock": 5,
            "category": "Hair Care",
            "branchNames": ["Downtown"],
            "status": "active",
        }),
    );
    store.seed(
        collections::PRODUCTS,
        "p2",
        json!({
            "name": "Retired Wax",
            "cost": 99.0,
            "totalStock": 99,
            "category": "Hair Care",
            "branchNames": ["Downtown"],
            "status": "inactive",
        }),
    );
    store.seed(
        collections::SERVICES,
        "s1",
        json!({
            "name": "Classic Haircut",
            "price": 100.0,
            "category": "Hair",
            "branchNames": ["Downtown"],
            "status": "active",
        }),
    );
    store.seed(
        collections::BOOKINGS,
        "b1",
        json!({
            "serviceId": "s1",
            "totalAmount": 200.0,
            "status": "completed",
            "createdAt": Utc::now().to_rfc3339(),
        }),
    );
}

#[test]
fn live_subscription_keeps_board_fresh() {
    init_logging();
    let store = InMemoryStore::new();
    store.seed(collections::ORDERS, "ord-1", order_doc("pending", 50.0));

    let mut board = OrdersBoard::new(&store);
    board.refresh_orders();
    assert_eq!(board.stats().total, 1);

    let subscription = board.watch();
    // Drain the subscribe-time delivery.
    assert_eq!(board.pump(&subscription), 1);

    // A new order lands upstream.
    store
        .set(collections::ORDERS, "ord-2", order_doc("delivered", 100.0))
        .unwrap();
    // And a customer registers.
    store
        .set(
            collections::CUSTOMERS,
            "uid-1",
            json!({"name": "Amira Khan", "status": "active"}),
        )
        .unwrap();

    let applied = board.pump(&subscription);
    assert_eq!(applied, 1);
    assert_eq!(board.stats().total, 2);
    assert_eq!(board.stats().delivered, 1);
    assert_eq!(board.stats().total_revenue, 100.0);
    assert_eq!(board.stats().today_orders, 2);
    assert_eq!(board.stats().active_customers, 1);
}

#[test]
fn status_update_from_another_session_arrives_via_subscription() {
    let store = InMemoryStore::new();
    store.seed(collections::ORDERS, "ord-1", order_doc("pending", 50.0));

    let mut board = OrdersBoard::new(&store);
    board.refresh_orders();
    let subscription = board.watch();
    board.pump(&subscription);

    // Another session confirms the order directly against the backend.
    store
        .update_fields(
            collections::ORDERS,
            "ord-1",
            json!({"status": "confirmed", "updatedAt": Utc::now().to_rfc3339()}),
        )
        .unwrap();

    board.pump(&subscription);
    assert_eq!(board.stats().confirmed, 1);
    assert_eq!(board.stats().pending, 0);
}

#[test]
fn own_update_survives_a_full_refetch() {
    let store = InMemoryStore::new();
    store.seed(collections::ORDERS, "ord-1", order_doc("pending", 50.0));

    let mut board = OrdersBoard::new(&store);
    board.refresh_orders();
    board
        .update_order_status(&OrderId::from("ord-1"), OrderStatus::Delivered)
        .unwrap();

    board.refresh_orders();
    assert_eq!(board.orders()[0].status, OrderStatus::Delivered);
    assert_eq!(board.stats().total_revenue, 50.0);
}

#[test]
fn expense_pipeline_end_to_end() {
    init_logging();
    let store = InMemoryStore::new();
    seed_expense_fixtures(&store);

    let mut board = ExpenseBoard::new(&store);
    board.refresh_all();

    // The inactive product is filtered out at the query.
    assert_eq!(board.products().len(), 1);
    let summary = board.summary();
    assert_eq!(summary.total_products_cost, 50.0);
    assert!((summary.total_services_cost - 30.0).abs() < 1e-9);
    assert!((summary.total_appointments_cost - 80.0).abs() < 1e-9);
    assert_eq!(summary.total_revenue, 200.0);
    assert!((summary.profit_margin - 20.0).abs() < 1e-9);

    // The booking lands in exactly one month bucket of the current year.
    let bucketed: f64 = summary.month_wise.iter().map(|r| r.revenue).sum();
    assert_eq!(bucketed, 200.0);

    assert_eq!(board.branch_options(), vec!["Downtown"]);

    let today = Utc::now().date_naive();
    let report = render_report(
        summary,
        today,
        ReportPeriod {
            start: today,
            end: today,
        },
        chrono::Local::now().year(),
    );
    assert!(report.contains("Total Revenue: $200.00"));
    assert!(report.contains("Downtown"));
}

#[test]
fn branch_filter_recomputes_summary() {
    let store = InMemoryStore::new();
    seed_expense_fixtures(&store);
    store.seed(
        collections::SERVICES,
        "s2",
        json!({
            "name": "Facial",
            "price": 50.0,
            "category": "Skin",
            "branchNames": ["Uptown"],
            "status": "active",
        }),
    );

    let mut board = ExpenseBoard::new(&store);
    board.refresh_all();
    assert!((board.summary().total_services_cost - 45.0).abs() < 1e-9);

    board.set_branch_filter(Some("Uptown".to_string()));
    let summary = board.summary();
    assert!((summary.total_services_cost - 15.0).abs() < 1e-9);
    assert_eq!(summary.total_products_cost, 0.0);
    // Breakdown rows still cover every branch.
    assert_eq!(summary.branch_wise.len(), 2);

    board.set_branch_filter(None);
    assert!((board.summary().total_services_cost - 45.0).abs() < 1e-9);
}

#[test]
fn one_failing_collection_leaves_the_others_populated() {
    // Delegates to an inner store but fails queries on one collection.
    struct FlakyStore<'a> {
        inner: &'a InMemoryStore,
        failing: &'static str,
    }

    impl DocumentStore for FlakyStore<'_> {
        fn get_all(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
            if query.collection_name() == self.failing {
                return Err(StoreError::query("transport down"));
            }
            self.inner.get_all(query)
        }
        fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
            self.inner.get(collection, id)
        }
        fn set(&self, collection: &str, id: &str, data: JsonValue) -> Result<(), StoreError> {
            self.inner.set(collection, id, data)
        }
        fn update_fields(
            &self,
            collection: &str,
            id: &str,
            fields: JsonValue,
        ) -> Result<(), StoreError> {
            self.inner.update_fields(collection, id, fields)
        }
        fn watch(&self, query: &Query) -> Subscription<Vec<Document>> {
            self.inner.watch(query)
        }
    }

    let inner = InMemoryStore::new();
    seed_expense_fixtures(&inner);

    let mut board = ExpenseBoard::new(FlakyStore {
        inner: &inner,
        failing: collections::BOOKINGS,
    });
    board.refresh_all();

    // Products and services refreshed; bookings silently stayed empty, so
    // the report skews: costs without booking revenue.
    let summary = board.summary();
    assert_eq!(summary.total_products_cost, 50.0);
    assert!((summary.total_services_cost - 30.0).abs() < 1e-9);
    assert_eq!(summary.total_appointments_cost, 0.0);
    assert_eq!(summary.total_revenue, 0.0);
    assert_eq!(summary.profit_margin, 0.0);
}
