use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salonops_core::{ServiceId, fields};
use salonops_store::Document;

use crate::product::ListingStatus;

/// A bookable service offered at one or more branches.
///
/// Services carry no recorded cost of their own; the expense calculator
/// applies a configurable ratio of the listed price instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Duration in minutes.
    pub duration: f64,
    pub category: String,
    pub category_id: String,
    pub image_url: String,
    pub branch_names: Vec<String>,
    pub branches: Vec<String>,
    pub status: ListingStatus,
    pub popularity: String,
    pub revenue: f64,
    pub total_bookings: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    /// Decode a service document, defaulting every missing field.
    pub fn from_document(doc: &Document) -> Self {
        let data = &doc.data;
        Self {
            id: ServiceId::from(doc.id.as_str()),
            name: fields::str_or_empty(data, "name"),
            description: fields::str_or_empty(data, "description"),
            price: fields::num(data, "price"),
            duration: fields::num(data, "duration"),
            category: fields::str_or_empty(data, "category"),
            category_id: fields::str_or_empty(data, "categoryId"),
            image_url: fields::str_or_empty(data, "imageUrl"),
            branch_names: fields::str_list(data, "branchNames"),
            branches: fields::str_list(data, "branches"),
            status: ListingStatus::from_field(data),
            popularity: fields::str_or(data, "popularity", "low"),
            revenue: fields::num(data, "revenue"),
            total_bookings: fields::num(data, "totalBookings"),
            created_at: fields::timestamp_or_now(data, "createdAt"),
            updated_at: fields::timestamp_or_now(data, "updatedAt"),
        }
    }

    pub fn listed_at(&self, branch: &str) -> bool {
        self.branch_names.iter().any(|b| b == branch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_document() {
        let doc = Document::new(
            "s1",
            json!({
                "name": "Classic Haircut",
                "price": 100.0,
                "duration": 45,
                "category": "Hair",
                "branchNames": ["Downtown", "Uptown"],
                "status": "active",
                "totalBookings": 12,
            }),
        );

        let service = Service::from_document(&doc);
        assert_eq!(service.price, 100.0);
        assert_eq!(service.duration, 45.0);
        assert!(service.listed_at("Uptown"));
        assert_eq!(service.popularity, "low");
    }
}
