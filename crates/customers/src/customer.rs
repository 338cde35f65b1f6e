use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salonops_core::{CustomerId, fields};
use salonops_store::Document;

/// Customer account status.
///
/// The backend stores this as a free-form string defaulting to `"active"`;
/// anything else is treated as inactive, which is exactly what the
/// active-customer counter observes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "active",
            CustomerStatus::Inactive => "inactive",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, CustomerStatus::Active)
    }
}

/// A registered customer, keyed by the authentication provider uid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub uid: CustomerId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub status: CustomerStatus,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

impl Customer {
    /// Decode a customer document, defaulting every missing field.
    pub fn from_document(doc: &Document) -> Self {
        let data = &doc.data;
        let status = match fields::str_or(data, "status", "active").as_str() {
            "active" => CustomerStatus::Active,
            _ => CustomerStatus::Inactive,
        };

        Self {
            uid: CustomerId::from(doc.id.as_str()),
            name: fields::str_or(data, "name", "Unknown Customer"),
            email: fields::str_or_empty(data, "email"),
            phone: fields::str_or_empty(data, "phone"),
            address: fields::str_or_empty(data, "address"),
            city: fields::str_or_empty(data, "city"),
            country: fields::str_or_empty(data, "country"),
            status,
            role: fields::str_or(data, "role", "customer"),
            created_at: fields::timestamp_or_now(data, "createdAt"),
            last_login: fields::timestamp_or_now(data, "lastLogin"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_full_document() {
        let doc = Document::new(
            "uid-1",
            json!({
                "name": "Amira Khan",
                "email": "amira@example.com",
                "phone": "555-0100",
                "address": "1 Main St",
                "city": "Lahore",
                "country": "PK",
                "status": "active",
                "role": "customer",
                "createdAt": "2026-02-01T09:00:00Z",
                "lastLogin": "2026-03-01T09:00:00Z",
            }),
        );

        let customer = Customer::from_document(&doc);
        assert_eq!(customer.uid.as_str(), "uid-1");
        assert_eq!(customer.name, "Amira Khan");
        assert!(customer.status.is_active());
    }

    #[test]
    fn missing_fields_default() {
        let doc = Document::new("uid-2", json!({}));
        let customer = Customer::from_document(&doc);

        assert_eq!(customer.name, "Unknown Customer");
        assert_eq!(customer.email, "");
        assert_eq!(customer.status, CustomerStatus::Active);
        assert_eq!(customer.role, "customer");
    }

    #[test]
    fn unknown_status_counts_as_inactive() {
        let doc = Document::new("uid-3", json!({"status": "suspended"}));
        let customer = Customer::from_document(&doc);
        assert!(!customer.status.is_active());
    }
}
