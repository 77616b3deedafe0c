//! In-Memory Store
//!
//! Namespace -> id -> record, behind a single `RwLock`. The default
//! backend for development and tests.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::KeyValueStore;

type Records = HashMap<String, HashMap<String, Value>>;

/// In-memory key-value store
#[derive(Default)]
pub struct MemoryStore {
    records: RwLock<Records>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, namespace: &str, id: &str) -> StoreResult<Option<Value>> {
        let records = self.records.read().map_err(StoreError::backend)?;
        Ok(records
            .get(namespace)
            .and_then(|ns| ns.get(id))
            .cloned())
    }

    fn put(&self, namespace: &str, id: &str, value: &Value) -> StoreResult<()> {
        let mut records = self.records.write().map_err(StoreError::backend)?;
        records
            .entry(namespace.to_string())
            .or_default()
            .insert(id.to_string(), value.clone());
        Ok(())
    }

    fn delete(&self, namespace: &str, id: &str) -> StoreResult<bool> {
        let mut records = self.records.write().map_err(StoreError::backend)?;
        Ok(records
            .get_mut(namespace)
            .map(|ns| ns.remove(id).is_some())
            .unwrap_or(false))
    }

    fn scan(&self, namespace: &str) -> StoreResult<Vec<Value>> {
        let records = self.records.read().map_err(StoreError::backend)?;
        let Some(ns) = records.get(namespace) else {
            return Ok(Vec::new());
        };

        let mut rows: Vec<(&String, &Value)> = ns.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));
        Ok(rows.into_iter().map(|(_, v)| v.clone()).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_put_and_get() {
        let store = MemoryStore::new();
        store.put("post", "1", &json!({"title": "first"})).unwrap();

        let record = store.get("post", "1").unwrap();
        assert_eq!(record, Some(json!({"title": "first"})));
    }

    #[test]
    fn test_get_missing_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("post", "nope").unwrap(), None);
    }

    #[test]
    fn test_put_replaces() {
        let store = MemoryStore::new();
        store.put("post", "1", &json!({"v": 1})).unwrap();
        store.put("post", "1", &json!({"v": 2})).unwrap();

        assert_eq!(store.get("post", "1").unwrap(), Some(json!({"v": 2})));
    }

    #[test]
    fn test_delete_reports_existence() {
        let store = MemoryStore::new();
        store.put("post", "1", &json!({})).unwrap();

        assert!(store.delete("post", "1").unwrap());
        assert!(!store.delete("post", "1").unwrap());
        assert_eq!(store.get("post", "1").unwrap(), None);
    }

    #[test]
    fn test_scan_is_ordered_by_id() {
        let store = MemoryStore::new();
        store.put("post", "b", &json!({"id": "b"})).unwrap();
        store.put("post", "a", &json!({"id": "a"})).unwrap();
        store.put("post", "c", &json!({"id": "c"})).unwrap();

        let rows = store.scan("post").unwrap();
        assert_eq!(rows, vec![json!({"id": "a"}), json!({"id": "b"}), json!({"id": "c"})]);
    }

    #[test]
    fn test_scan_empty_namespace() {
        let store = MemoryStore::new();
        assert!(store.scan("post").unwrap().is_empty());
    }

    #[test]
    fn test_namespaces_are_isolated() {
        let store = MemoryStore::new();
        store.put("post", "1", &json!({"kind": "post"})).unwrap();
        store.put("user", "1", &json!({"kind": "user"})).unwrap();

        assert_eq!(
            store.get("post", "1").unwrap(),
            Some(json!({"kind": "post"}))
        );
        assert_eq!(store.scan("user").unwrap().len(), 1);
    }
}
