use serde_json::Value as JsonValue;

/// Sort direction for an ordered snapshot.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// A collection query: equality filters plus an optional order-by.
///
/// This mirrors the subset of the backend query surface the dashboard
/// actually uses — `where field == value` and `order by field` — nothing
/// richer. Range filters, limits and composite indexes stay on the backend
/// side of the boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    collection: String,
    filters: Vec<(String, JsonValue)>,
    order_by: Option<(String, Direction)>,
}

impl Query {
    pub fn collection(name: impl Into<String>) -> Self {
        Self {
            collection: name.into(),
            filters: Vec::new(),
            order_by: None,
        }
    }

    /// Add an equality filter on `field`.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Order results by `field`.
    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some((field.into(), direction));
        self
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    pub fn filters(&self) -> &[(String, JsonValue)] {
        &self.filters
    }

    pub fn ordering(&self) -> Option<(&str, Direction)> {
        self.order_by
            .as_ref()
            .map(|(field, dir)| (field.as_str(), *dir))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builder_accumulates_filters_and_ordering() {
        let q = Query::collection("orders")
            .where_eq("status", "active")
            .order_by("createdAt", Direction::Descending);

        assert_eq!(q.collection_name(), "orders");
        assert_eq!(q.filters(), &[("status".to_string(), json!("active"))]);
        assert_eq!(q.ordering(), Some(("createdAt", Direction::Descending)));
    }
}
