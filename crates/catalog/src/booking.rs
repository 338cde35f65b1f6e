use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salonops_core::{BookingId, CustomerId, ServiceId, fields};
use salonops_store::Document;

/// Booking/appointment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, BookingStatus::Completed)
    }

    fn from_field(data: &serde_json::Value) -> Self {
        match fields::str_or(data, "status", "pending").as_str() {
            "confirmed" => BookingStatus::Confirmed,
            "completed" => BookingStatus::Completed,
            "cancelled" => BookingStatus::Cancelled,
            _ => BookingStatus::Pending,
        }
    }
}

/// A service booking.
///
/// Only **completed** bookings contribute revenue (and heuristic cost) to
/// the expense summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: BookingId,
    pub service_id: ServiceId,
    pub service_name: String,
    pub service_price: f64,
    pub total_amount: f64,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub customer_email: String,
    /// Appointment date as entered (free-form, e.g. `2026-03-14`).
    pub date: String,
    /// Appointment time as entered (free-form, e.g. `14:30`).
    pub time: String,
    pub status: BookingStatus,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Decode a booking document, defaulting every missing field.
    pub fn from_document(doc: &Document) -> Self {
        let data = &doc.data;
        Self {
            id: BookingId::from(doc.id.as_str()),
            service_id: ServiceId::from(fields::str_or_empty(data, "serviceId")),
            service_name: fields::str_or_empty(data, "serviceName"),
            service_price: fields::num(data, "servicePrice"),
            total_amount: fields::num(data, "totalAmount"),
            customer_id: CustomerId::from(fields::str_or_empty(data, "customerId")),
            customer_name: fields::str_or_empty(data, "customerName"),
            customer_email: fields::str_or_empty(data, "customerEmail"),
            date: fields::str_or_empty(data, "date"),
            time: fields::str_or_empty(data, "time"),
            status: BookingStatus::from_field(data),
            notes: fields::str_or_empty(data, "notes"),
            created_at: fields::timestamp_or_now(data, "createdAt"),
            updated_at: fields::timestamp_or_now(data, "updatedAt"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_document() {
        let doc = Document::new(
            "b1",
            json!({
                "serviceId": "s1",
                "serviceName": "Classic Haircut",
                "servicePrice": 100.0,
                "totalAmount": 200.0,
                "customerId": "uid-1",
                "date": "2026-03-14",
                "time": "14:30",
                "status": "completed",
                "createdAt": "2026-03-10T08:00:00Z",
            }),
        );

        let booking = Booking::from_document(&doc);
        assert_eq!(booking.total_amount, 200.0);
        assert!(booking.status.is_completed());
    }

    #[test]
    fn missing_status_is_pending() {
        let booking = Booking::from_document(&Document::new("b2", json!({})));
        assert_eq!(booking.status, BookingStatus::Pending);
        assert!(!booking.status.is_completed());
    }
}
