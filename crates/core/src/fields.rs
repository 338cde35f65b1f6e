//! Defensive field extraction from backend documents.
//!
//! Documents arrive as loose JSON: fields may be missing, null, or the wrong
//! type. Readers never fail on malformed data — a missing numeric becomes 0,
//! a missing string becomes the caller's placeholder, a missing timestamp
//! becomes the current time.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Read a string field, falling back to `default` when absent or non-string.
pub fn str_or(doc: &Value, key: &str, default: &str) -> String {
    match doc.get(key).and_then(Value::as_str) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => default.to_string(),
    }
}

/// Read a string field, allowing the empty string through.
pub fn str_or_empty(doc: &Value, key: &str) -> String {
    doc.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Read a numeric field, falling back to 0 when absent or non-numeric.
pub fn num(doc: &Value, key: &str) -> f64 {
    num_or(doc, key, 0.0)
}

/// Read a numeric field with an explicit fallback.
pub fn num_or(doc: &Value, key: &str, default: f64) -> f64 {
    doc.get(key).and_then(Value::as_f64).unwrap_or(default)
}

/// Read an array of strings; non-string elements are dropped.
pub fn str_list(doc: &Value, key: &str) -> Vec<String> {
    doc.get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Read an RFC 3339 timestamp field, falling back to the current time.
pub fn timestamp_or_now(doc: &Value, key: &str) -> DateTime<Utc> {
    doc.get(key)
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(Utc::now)
}
