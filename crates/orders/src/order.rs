use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use salonops_core::{CustomerId, DomainError, OrderId, ProductId, fields};
use salonops_store::Document;

/// Fallback image shown for line items whose document carries none.
pub const DEFAULT_ITEM_IMAGE: &str =
    "https://images.unsplash.com/photo-1512690196222-7c7d3f993c1b?q=80&w=2070&auto=format&fit=crop";

/// Order status lifecycle.
///
/// The happy path runs pending → confirmed → processing → shipped →
/// delivered; cancelled and refunded are terminal alternates reachable from
/// any point. Transitions are **not** enforced at this layer — staff may set
/// any status from the dashboard, matching the backend's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
    Refunded,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
        OrderStatus::Refunded,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Refunded => "refunded",
        }
    }

    /// Whether the order can progress no further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            OrderStatus::Delivered | OrderStatus::Cancelled | OrderStatus::Refunded
        )
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" => Ok(OrderStatus::Confirmed),
            "processing" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" => Ok(OrderStatus::Cancelled),
            "refunded" => Ok(OrderStatus::Refunded),
            other => Err(DomainError::validation(format!(
                "unknown order status: {other}"
            ))),
        }
    }
}

/// One line of an order: a product reference plus the captured name, price
/// and quantity at purchase time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: f64,
    pub quantity: f64,
    pub image: String,
}

impl OrderItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity
    }

    fn from_value(value: &JsonValue) -> Self {
        Self {
            product_id: ProductId::from(fields::str_or_empty(value, "productId")),
            product_name: fields::str_or(value, "productName", "Unknown Product"),
            price: fields::num(value, "price"),
            quantity: fields::num_or(value, "quantity", 1.0),
            image: fields::str_or(value, "image", DEFAULT_ITEM_IMAGE),
        }
    }
}

/// A product order.
///
/// `total_amount` is whatever the backend recorded; it *should* equal the
/// sum of line totals but that is not enforced here — see [`Order::items_total`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    pub items: Vec<OrderItem>,
    pub total_amount: f64,
    pub payment_method: String,
    pub shipping_address: String,
    pub status: OrderStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Decode an order document, defaulting every missing field.
    pub fn from_document(doc: &Document) -> Self {
        let data = &doc.data;

        let items = data
            .get("products")
            .and_then(JsonValue::as_array)
            .map(|items| items.iter().map(OrderItem::from_value).collect())
            .unwrap_or_default();

        let status = fields::str_or(data, "status", "pending")
            .parse()
            .unwrap_or(OrderStatus::Pending);

        Self {
            id: OrderId::from(doc.id.as_str()),
            customer_id: CustomerId::from(fields::str_or_empty(data, "customerId")),
            customer_name: fields::str_or(data, "customerName", "Unknown Customer"),
            customer_email: fields::str_or(data, "customerEmail", "No Email"),
            items,
            total_amount: fields::num(data, "totalAmount"),
            payment_method: fields::str_or(data, "paymentMethod", "Unknown"),
            shipping_address: fields::str_or_empty(data, "shippingAddress"),
            status,
            notes: fields::str_or_empty(data, "notes"),
            created_at: fields::timestamp_or_now(data, "createdAt"),
            updated_at: fields::timestamp_or_now(data, "updatedAt"),
        }
    }

    /// Sum of line totals (price × quantity).
    ///
    /// Kept separate from `total_amount` so callers can spot drift; nothing
    /// in this layer reconciles the two.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(OrderItem::line_total).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_doc() -> Document {
        Document::new(
            "ord-1",
            json!({
                "customerId": "uid-1",
                "customerName": "Amira Khan",
                "customerEmail": "amira@example.com",
                "products": [
                    {"productId": "p1", "productName": "Argan Oil", "price": 25.0, "quantity": 2, "image": "https://cdn.example/argan.jpg"},
                    {"productId": "p2", "price": 10.0},
                ],
                "totalAmount": 60.0,
                "paymentMethod": "card",
                "shippingAddress": "1 Main St",
                "status": "confirmed",
                "notes": "leave at door",
                "createdAt": "2026-03-01T10:00:00Z",
                "updatedAt": "2026-03-02T10:00:00Z",
            }),
        )
    }

    #[test]
    fn decodes_full_document() {
        let order = Order::from_document(&order_doc());

        assert_eq!(order.id.as_str(), "ord-1");
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.total_amount, 60.0);
        assert_eq!(order.payment_method, "card");
    }

    #[test]
    fn item_defaults_apply() {
        let order = Order::from_document(&order_doc());
        let second = &order.items[1];

        assert_eq!(second.product_name, "Unknown Product");
        assert_eq!(second.quantity, 1.0);
        assert_eq!(second.image, DEFAULT_ITEM_IMAGE);
    }

    #[test]
    fn empty_document_defaults() {
        let order = Order::from_document(&Document::new("ord-2", json!({})));

        assert_eq!(order.customer_name, "Unknown Customer");
        assert_eq!(order.customer_email, "No Email");
        assert_eq!(order.payment_method, "Unknown");
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.items.is_empty());
        assert_eq!(order.total_amount, 0.0);
    }

    #[test]
    fn unknown_status_falls_back_to_pending() {
        let order = Order::from_document(&Document::new("ord-3", json!({"status": "lost"})));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn items_total_sums_lines() {
        let order = Order::from_document(&order_doc());
        // 25 × 2 + 10 × 1
        assert_eq!(order.items_total(), 60.0);
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(OrderStatus::Refunded.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }
}
