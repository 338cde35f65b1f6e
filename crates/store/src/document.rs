use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A document snapshot: the backend id plus the raw JSON payload.
///
/// Payloads are intentionally untyped here — field shape varies per
/// collection and per document age, so domain crates decode defensively
/// rather than relying on a fixed schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: JsonValue,
}

impl Document {
    pub fn new(id: impl Into<String>, data: JsonValue) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}
