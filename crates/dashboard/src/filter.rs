//! In-memory order filtering and search.

use std::collections::HashMap;

use chrono::NaiveDate;

use salonops_core::CustomerId;
use salonops_customers::Customer;
use salonops_orders::{Order, OrderStatus};

use crate::stats::local_calendar_date;

/// Predicates applied over the fetched order list.
///
/// All criteria must match. The search text is matched case-insensitively
/// against the customer name, customer email, the customer's phone (looked
/// up in the customer map) and every line item's product name; an empty
/// search matches everything.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OrderFilter {
    pub search: String,
    pub status: Option<OrderStatus>,
    pub payment_method: Option<String>,
    pub date: Option<NaiveDate>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order, customers: &HashMap<CustomerId, Customer>) -> bool {
        let needle = self.search.to_lowercase();
        let matches_search = needle.is_empty() || {
            let phone = customers
                .get(&order.customer_id)
                .map(|c| c.phone.as_str())
                .unwrap_or("");

            order.customer_name.to_lowercase().contains(&needle)
                || order.customer_email.to_lowercase().contains(&needle)
                || phone.to_lowercase().contains(&needle)
                || order
                    .items
                    .iter()
                    .any(|item| item.product_name.to_lowercase().contains(&needle))
        };

        let matches_status = self.status.is_none_or(|status| order.status == status);
        let matches_payment = self
            .payment_method
            .as_deref()
            .is_none_or(|method| order.payment_method == method);
        let matches_date = self
            .date
            .is_none_or(|date| local_calendar_date(order.created_at) == date);

        matches_search && matches_status && matches_payment && matches_date
    }
}

/// The orders passing `filter`, in their original order.
pub fn filter_orders<'a>(
    orders: &'a [Order],
    customers: &HashMap<CustomerId, Customer>,
    filter: &OrderFilter,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order, customers))
        .collect()
}

/// Distinct payment methods across the order list, first-seen order; feeds
/// the payment filter options.
pub fn payment_methods(orders: &[Order]) -> Vec<String> {
    let mut methods: Vec<String> = Vec::new();
    for order in orders {
        if !methods.iter().any(|m| m == &order.payment_method) {
            methods.push(order.payment_method.clone());
        }
    }
    methods
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    use salonops_core::{OrderId, ProductId};
    use salonops_customers::CustomerStatus;
    use salonops_orders::{DEFAULT_ITEM_IMAGE, OrderItem};

    fn order(name: &str, email: &str, payment: &str, status: OrderStatus) -> Order {
        Order {
            id: OrderId::new(),
            customer_id: CustomerId::from("uid-1"),
            customer_name: name.to_string(),
            customer_email: email.to_string(),
            items: vec![OrderItem {
                product_id: ProductId::from("p1"),
                product_name: "Argan Oil".to_string(),
                price: 25.0,
                quantity: 1.0,
                image: DEFAULT_ITEM_IMAGE.to_string(),
            }],
            total_amount: 25.0,
            payment_method: payment.to_string(),
            shipping_address: String::new(),
            status,
            notes: String::new(),
            created_at: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap(),
        }
    }

    fn customers() -> HashMap<CustomerId, Customer> {
        let customer = Customer {
            uid: CustomerId::from("uid-1"),
            name: "Amira Khan".to_string(),
            email: "amira@example.com".to_string(),
            phone: "555-0100".to_string(),
            address: String::new(),
            city: String::new(),
            country: String::new(),
            status: CustomerStatus::Active,
            role: "customer".to_string(),
            created_at: Utc::now(),
            last_login: Utc::now(),
        };
        HashMap::from([(customer.uid.clone(), customer)])
    }

    #[test]
    fn empty_filter_matches_everything() {
        let orders = vec![order("Amira Khan", "amira@example.com", "card", OrderStatus::Pending)];
        let matched = filter_orders(&orders, &customers(), &OrderFilter::default());
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let orders = vec![order("Amira Khan", "amira@example.com", "card", OrderStatus::Pending)];
        let customers = customers();

        for needle in ["amira", "KHAN", "argan", "555-0100", "@example"] {
            let filter = OrderFilter {
                search: needle.to_string(),
                ..OrderFilter::default()
            };
            assert_eq!(
                filter_orders(&orders, &customers, &filter).len(),
                1,
                "expected a match for {needle:?}"
            );
        }

        let filter = OrderFilter {
            search: "nothing-here".to_string(),
            ..OrderFilter::default()
        };
        assert!(filter_orders(&orders, &customers, &filter).is_empty());
    }

    #[test]
    fn phone_search_tolerates_missing_customer() {
        let orders = vec![order("Amira Khan", "amira@example.com", "card", OrderStatus::Pending)];
        let filter = OrderFilter {
            search: "555-0100".to_string(),
            ..OrderFilter::default()
        };
        // No customer map entry: phone cannot match, other fields still can.
        assert!(filter_orders(&orders, &HashMap::new(), &filter).is_empty());
    }

    #[test]
    fn status_and_payment_filters_combine() {
        let orders = vec![
            order("A", "a@example.com", "card", OrderStatus::Pending),
            order("B", "b@example.com", "cash", OrderStatus::Pending),
            order("C", "c@example.com", "card", OrderStatus::Delivered),
        ];
        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            payment_method: Some("card".to_string()),
            ..OrderFilter::default()
        };

        let matched = filter_orders(&orders, &customers(), &filter);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].customer_name, "A");
    }

    #[test]
    fn date_filter_uses_local_calendar_date() {
        let orders = vec![order("A", "a@example.com", "card", OrderStatus::Pending)];
        let created = orders[0].created_at;

        let filter = OrderFilter {
            date: Some(local_calendar_date(created)),
            ..OrderFilter::default()
        };
        assert_eq!(filter_orders(&orders, &customers(), &filter).len(), 1);

        let filter = OrderFilter {
            date: Some(local_calendar_date(created) + chrono::Duration::days(1)),
            ..OrderFilter::default()
        };
        assert!(filter_orders(&orders, &customers(), &filter).is_empty());
    }

    #[test]
    fn payment_methods_are_distinct_first_seen() {
        let orders = vec![
            order("A", "a@example.com", "card", OrderStatus::Pending),
            order("B", "b@example.com", "cash", OrderStatus::Pending),
            order("C", "c@example.com", "card", OrderStatus::Pending),
        ];
        assert_eq!(payment_methods(&orders), vec!["card", "cash"]);
    }
}
