//! On-Disk Store
//!
//! One JSON file per record under `<root>/<namespace>/<id>.json`.
//! Survives restarts; no cache layer, every call hits the filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde_json::Value;

use super::errors::{StoreError, StoreResult};
use super::KeyValueStore;

/// Filesystem-backed key-value store
#[derive(Debug)]
pub struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    /// Create a store rooted at the given directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn record_path(&self, namespace: &str, id: &str) -> StoreResult<PathBuf> {
        // Ids and namespaces become file names; keep them out of parent dirs
        for segment in [namespace, id] {
            if segment.is_empty()
                || segment.contains('/')
                || segment.contains('\\')
                || segment == "."
                || segment == ".."
            {
                return Err(StoreError::Backend(format!("invalid key segment: {segment:?}")));
            }
        }
        Ok(self.root.join(namespace).join(format!("{id}.json")))
    }
}

impl KeyValueStore for DiskStore {
    fn get(&self, namespace: &str, id: &str) -> StoreResult<Option<Value>> {
        let path = self.record_path(namespace, id)?;

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::backend(e)),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(StoreError::backend)
    }

    fn put(&self, namespace: &str, id: &str, value: &Value) -> StoreResult<()> {
        let path = self.record_path(namespace, id)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(StoreError::backend)?;
        }

        let bytes = serde_json::to_vec(value).map_err(StoreError::backend)?;
        fs::write(&path, bytes).map_err(StoreError::backend)
    }

    fn delete(&self, namespace: &str, id: &str) -> StoreResult<bool> {
        let path = self.record_path(namespace, id)?;

        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::backend(e)),
        }
    }

    fn scan(&self, namespace: &str) -> StoreResult<Vec<Value>> {
        let dir = self.root.join(namespace);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut names: Vec<PathBuf> = Vec::new();
        for entry in fs::read_dir(&dir).map_err(StoreError::backend)? {
            let entry = entry.map_err(StoreError::backend)?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                names.push(path);
            }
        }
        names.sort();

        let mut rows = Vec::with_capacity(names.len());
        for path in names {
            let bytes = fs::read(&path).map_err(StoreError::backend)?;
            rows.push(serde_json::from_slice(&bytes).map_err(StoreError::backend)?);
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_put_and_get() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        store.put("post", "1", &json!({"title": "first"})).unwrap();
        assert_eq!(
            store.get("post", "1").unwrap(),
            Some(json!({"title": "first"}))
        );
    }

    #[test]
    fn test_get_missing_is_none() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        assert_eq!(store.get("post", "nope").unwrap(), None);
    }

    #[test]
    fn test_records_survive_reopen() {
        let dir = TempDir::new().unwrap();

        {
            let store = DiskStore::new(dir.path());
            store.put("post", "42", &json!({"title": "kept"})).unwrap();
        }

        let reopened = DiskStore::new(dir.path());
        assert_eq!(
            reopened.get("post", "42").unwrap(),
            Some(json!({"title": "kept"}))
        );
    }

    #[test]
    fn test_delete_reports_existence() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        store.put("post", "1", &json!({})).unwrap();
        assert!(store.delete("post", "1").unwrap());
        assert!(!store.delete("post", "1").unwrap());
    }

    #[test]
    fn test_scan_is_ordered() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        store.put("post", "b", &json!({"id": "b"})).unwrap();
        store.put("post", "a", &json!({"id": "a"})).unwrap();

        let rows = store.scan("post").unwrap();
        assert_eq!(rows, vec![json!({"id": "a"}), json!({"id": "b"})]);
    }

    #[test]
    fn test_scan_missing_namespace_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        assert!(store.scan("post").unwrap().is_empty());
    }

    #[test]
    fn test_path_segments_are_validated() {
        let dir = TempDir::new().unwrap();
        let store = DiskStore::new(dir.path());

        let err = store.get("post", "../escape").unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }
}
