use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use salonops_core::{ProductId, fields};
use salonops_store::Document;

/// Listing status shared by products and services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Active,
    Inactive,
}

impl ListingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListingStatus::Active => "active",
            ListingStatus::Inactive => "inactive",
        }
    }

    pub(crate) fn from_field(data: &serde_json::Value) -> Self {
        match fields::str_or(data, "status", "active").as_str() {
            "active" => ListingStatus::Active,
            _ => ListingStatus::Inactive,
        }
    }
}

/// A retail product listed at one or more branches.
///
/// `cost` is the per-unit acquisition cost; `total_stock` the cumulative
/// stock across branches. `total_sold`/`revenue` are backend-maintained
/// running totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub cost: f64,
    pub category: String,
    pub category_id: String,
    pub image_url: String,
    pub branch_names: Vec<String>,
    pub branches: Vec<String>,
    pub stock: f64,
    pub total_stock: f64,
    pub total_sold: f64,
    pub revenue: f64,
    pub status: ListingStatus,
    pub sku: String,
    pub rating: f64,
    pub reviews: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Decode a product document, defaulting every missing field.
    pub fn from_document(doc: &Document) -> Self {
        let data = &doc.data;
        Self {
            id: ProductId::from(doc.id.as_str()),
            name: fields::str_or_empty(data, "name"),
            description: fields::str_or_empty(data, "description"),
            price: fields::num(data, "price"),
            cost: fields::num(data, "cost"),
            category: fields::str_or_empty(data, "category"),
            category_id: fields::str_or_empty(data, "categoryId"),
            image_url: fields::str_or_empty(data, "imageUrl"),
            branch_names: fields::str_list(data, "branchNames"),
            branches: fields::str_list(data, "branches"),
            stock: fields::num(data, "stock"),
            total_stock: fields::num(data, "totalStock"),
            total_sold: fields::num(data, "totalSold"),
            revenue: fields::num(data, "revenue"),
            status: ListingStatus::from_field(data),
            sku: fields::str_or_empty(data, "sku"),
            rating: fields::num(data, "rating"),
            reviews: fields::num(data, "reviews"),
            created_at: fields::timestamp_or_now(data, "createdAt"),
            updated_at: fields::timestamp_or_now(data, "updatedAt"),
        }
    }

    /// Inventory carrying cost: unit cost × total stock.
    pub fn inventory_cost(&self) -> f64 {
        self.cost * self.total_stock
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
    fn decodes_and_costs() {
        let doc = Document::new(
            "p1",
            json!({
                "name": "Argan Oil",
                "price": 25.0,
                "cost": 10.0,
                "category": "Hair Care",
                "branchNames": ["Downtown"],
                "totalStock": 5,
                "status": "active",
            }),
        );

        let product = Product::from_document(&doc);
        assert_eq!(product.inventory_cost(), 50.0);
        assert!(product.listed_at("Downtown"));
        assert!(!product.listed_at("Uptown"));
        assert_eq!(product.status, ListingStatus::Active);
    }

    #[test]
    fn empty_document_defaults() {
        let product = Product::from_document(&Document::new("p2", json!({})));
        assert_eq!(product.name, "");
        assert_eq!(product.inventory_cost(), 0.0);
        assert!(product.branch_names.is_empty());
        assert_eq!(product.status, ListingStatus::Active);
    }
}
