//! Local session markers.
//!
//! The dashboard persists a couple of small JSON markers across page loads
//! (the signed-in profile and, for customer sign-ins, a portal-access
//! marker). The storage itself lives in the host shell; this is its
//! boundary.

use std::collections::HashMap;
use std::sync::Mutex;

use serde_json::Value as JsonValue;

/// Marker holding the signed-in profile.
pub const USER_KEY: &str = "user";

/// Marker granting customer-portal access; survives admin sign-outs.
pub const CUSTOMER_AUTH_KEY: &str = "customerAuth";

/// Key/value cache for session markers.
pub trait SessionCache: Send + Sync {
    fn put(&self, key: &str, value: JsonValue);

    fn get(&self, key: &str) -> Option<JsonValue>;

    fn remove(&self, key: &str);
}

/// In-memory session cache for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySessionCache {
    entries: Mutex<HashMap<String, JsonValue>>,
}

impl InMemorySessionCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionCache for InMemorySessionCache {
    fn put(&self, key: &str, value: JsonValue) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value);
        }
    }

    fn get(&self, key: &str) -> Option<JsonValue> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

impl<C> SessionCache for std::sync::Arc<C>
where
    C: SessionCache + ?Sized,
{
    fn put(&self, key: &str, value: JsonValue) {
        (**self).put(key, value);
    }

    fn get(&self, key: &str) -> Option<JsonValue> {
        (**self).get(key)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}
