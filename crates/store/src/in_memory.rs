//! In-memory document store for tests/dev.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, RwLock, mpsc};

use serde_json::Value as JsonValue;

use crate::document::Document;
use crate::query::{Direction, Query};
use crate::store::{DocumentStore, StoreError};
use crate::subscription::Subscription;

struct Watcher {
    query: Query,
    sender: mpsc::Sender<Vec<Document>>,
}

/// In-memory collection store.
///
/// - No IO / no async
/// - Full-snapshot redelivery to watchers on every mutation
/// - Dead watchers are pruned when delivery fails
#[derive(Default)]
pub struct InMemoryStore {
    collections: RwLock<HashMap<String, BTreeMap<String, JsonValue>>>,
    watchers: Mutex<Vec<Watcher>>,
}

impl core::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryStore").finish_non_exhaustive()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a collection document without notifying watchers.
    ///
    /// Test convenience for arranging fixtures before subscribing.
    pub fn seed(&self, collection: &str, id: &str, data: JsonValue) {
        if let Ok(mut collections) = self.collections.write() {
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), data);
        }
    }

    fn evaluate(
        collections: &HashMap<String, BTreeMap<String, JsonValue>>,
        query: &Query,
    ) -> Vec<Document> {
        let Some(collection) = collections.get(query.collection_name()) else {
            return Vec::new();
        };

        let mut documents: Vec<Document> = collection
            .iter()
            .filter(|(_, data)| {
                query
                    .filters()
                    .iter()
                    .all(|(field, value)| data.get(field) == Some(value))
            })
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .collect();

        if let Some((field, direction)) = query.ordering() {
            documents.sort_by(|a, b| {
                let ord = cmp_json(a.data.get(field), b.data.get(field));
                match direction {
                    Direction::Ascending => ord,
                    Direction::Descending => ord.reverse(),
                }
            });
        }

        documents
    }

    /// Redeliver fresh snapshots to every watcher of `collection`.
    fn notify(&self, collection: &str) {
        let Ok(collections) = self.collections.read() else {
            return;
        };
        let Ok(mut watchers) = self.watchers.lock() else {
            return;
        };

        // Drop any dead watchers while delivering.
        watchers.retain(|w| {
            if w.query.collection_name() != collection {
                return true;
            }
            let snapshot = Self::evaluate(&collections, &w.query);
            w.sender.send(snapshot).is_ok()
        });
    }
}

impl DocumentStore for InMemoryStore {
    fn get_all(&self, query: &Query) -> Result<Vec<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::query("lock poisoned"))?;
        Ok(Self::evaluate(&collections, query))
    }

    fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self
            .collections
            .read()
            .map_err(|_| StoreError::query("lock poisoned"))?;
        Ok(collections
            .get(collection)
            .and_then(|c| c.get(id))
            .map(|data| Document::new(id, data.clone())))
    }

    fn set(&self, collection: &str, id: &str, data: JsonValue) -> Result<(), StoreError> {
        {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StoreError::write("lock poisoned"))?;
            collections
                .entry(collection.to_string())
                .or_default()
                .insert(id.to_string(), data);
        }
        self.notify(collection);
        Ok(())
    }

    fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: JsonValue,
    ) -> Result<(), StoreError> {
        let JsonValue::Object(fields) = fields else {
            return Err(StoreError::write("partial update requires an object"));
        };

        {
            let mut collections = self
                .collections
                .write()
                .map_err(|_| StoreError::write("lock poisoned"))?;
            let document = collections
                .get_mut(collection)
                .and_then(|c| c.get_mut(id))
                .ok_or_else(|| StoreError::not_found(collection, id))?;

            if !document.is_object() {
                *document = JsonValue::Object(serde_json::Map::new());
            }
            if let Some(target) = document.as_object_mut() {
                for (key, value) in fields {
                    target.insert(key, value);
                }
            }
        }
        self.notify(collection);
        Ok(())
    }

    fn watch(&self, query: &Query) -> Subscription<Vec<Document>> {
        let (tx, rx) = mpsc::channel();

        // Deliver the current snapshot up front so subscribers need no
        // separate initial fetch.
        if let Ok(collections) = self.collections.read() {
            let _ = tx.send(Self::evaluate(&collections, query));
        }

        // If the lock is poisoned, we still return a subscription; it just
        // won't receive messages until the process restarts.
        if let Ok(mut watchers) = self.watchers.lock() {
            watchers.push(Watcher {
                query: query.clone(),
                sender: tx,
            });
        }

        Subscription::new(rx)
    }
}

/// Order two optional JSON values: numbers numerically, strings
/// lexicographically (RFC 3339 timestamps sort correctly this way), missing
/// values first, mixed types by type rank.
fn cmp_json(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => match (a, b) {
            (JsonValue::Number(x), JsonValue::Number(y)) => x
                .as_f64()
                .partial_cmp(&y.as_f64())
                .unwrap_or(Ordering::Equal),
            (JsonValue::String(x), JsonValue::String(y)) => x.cmp(y),
            (JsonValue::Bool(x), JsonValue::Bool(y)) => x.cmp(y),
            _ => type_rank(a).cmp(&type_rank(b)),
        },
    }
}

fn type_rank(value: &JsonValue) -> u8 {
    match value {
        JsonValue::Null => 0,
        JsonValue::Bool(_) => 1,
        JsonValue::Number(_) => 2,
        JsonValue::String(_) => 3,
        JsonValue::Array(_) => 4,
        JsonValue::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_all_filters_and_orders() {
        let store = InMemoryStore::new();
        store.seed("orders", "a", json!({"status": "pending", "createdAt": "2026-01-02T00:00:00Z"}));
        store.seed("orders", "b", json!({"status": "pending", "createdAt": "2026-01-03T00:00:00Z"}));
        store.seed("orders", "c", json!({"status": "delivered", "createdAt": "2026-01-01T00:00:00Z"}));

        let query = Query::collection("orders")
            .where_eq("status", "pending")
            .order_by("createdAt", Direction::Descending);
        let docs = store.get_all(&query).unwrap();

        let ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn get_all_on_missing_collection_is_empty() {
        let store = InMemoryStore::new();
        let docs = store.get_all(&Query::collection("nothing")).unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn update_fields_merges_without_clobbering() {
        let store = InMemoryStore::new();
        store.seed("orders", "a", json!({"status": "pending", "totalAmount": 50.0}));

        store
            .update_fields("orders", "a", json!({"status": "confirmed"}))
            .unwrap();

        let doc = store.get("orders", "a").unwrap().unwrap();
        assert_eq!(doc.data["status"], "confirmed");
        assert_eq!(doc.data["totalAmount"], 50.0);
    }

    #[test]
    fn update_fields_on_missing_document_is_not_found() {
        let store = InMemoryStore::new();
        let err = store
            .update_fields("orders", "ghost", json!({"status": "confirmed"}))
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn watch_delivers_initial_snapshot_then_changes() {
        let store = InMemoryStore::new();
        store.seed("orders", "a", json!({"status": "pending"}));

        let sub = store.watch(&Query::collection("orders"));
        let initial = sub.try_recv().unwrap();
        assert_eq!(initial.len(), 1);

        store.set("orders", "b", json!({"status": "pending"})).unwrap();
        let next = sub.try_recv().unwrap();
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn watch_respects_query_filter() {
        let store = InMemoryStore::new();
        let sub = store.watch(&Query::collection("products").where_eq("status", "active"));
        let _ = sub.try_recv().unwrap();

        store
            .set("products", "p1", json!({"status": "inactive"}))
            .unwrap();
        let snapshot = sub.try_recv().unwrap();
        assert!(snapshot.is_empty());

        store
            .set("products", "p2", json!({"status": "active"}))
            .unwrap();
        let snapshot = sub.try_recv().unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].id, "p2");
    }

    #[test]
    fn dropped_subscription_is_pruned() {
        let store = InMemoryStore::new();
        {
            let _sub = store.watch(&Query::collection("orders"));
        }
        store.set("orders", "a", json!({})).unwrap();
        assert!(store.watchers.lock().unwrap().is_empty());
    }

    #[test]
    fn writes_to_other_collections_do_not_notify() {
        let store = InMemoryStore::new();
        let sub = store.watch(&Query::collection("orders"));
        let _ = sub.try_recv().unwrap();

        store.set("customers", "c1", json!({})).unwrap();
        assert!(sub.try_recv().is_err());
    }
}
