//! Storage Adapter
//!
//! Translates an HTTP-shaped request context into key-value store
//! operations. The outcome feeds the response translator: a not-found
//! error, another error, or an optional data value.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::context::RequestContext;
use crate::store::{KeyValueStore, StoreError, StoreResult};

/// Record encoding used by the store; JSON is the only supported value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ValueEncoding {
    #[default]
    Json,
}

/// Options for one dispatch: a fixed encoding plus the typed params.
///
/// Replaces ad hoc option merging; there are no unknown fields.
#[derive(Debug, Clone, Default)]
pub struct DispatchOptions {
    pub encoding: ValueEncoding,
    pub params: BTreeMap<String, String>,
}

impl DispatchOptions {
    /// Build options for a request, defaulting to JSON encoding
    pub fn from_context(ctx: &RequestContext) -> Self {
        Self {
            encoding: ValueEncoding::Json,
            params: ctx.params.clone(),
        }
    }
}

/// Adapter between the resource routes and a key-value store.
///
/// One instance per resource; the store itself is shared across all
/// resources and in-flight requests.
pub struct StorageAdapter {
    namespace: String,
    store: Arc<dyn KeyValueStore>,
}

impl StorageAdapter {
    /// Create an adapter writing into the given namespace
    pub fn new(namespace: impl Into<String>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            namespace: namespace.into(),
            store,
        }
    }

    /// Perform the CRUD action implied by the request's method and id.
    ///
    /// `Ok(None)` means "no data": an empty list, or a completed delete.
    pub async fn dispatch(
        &self,
        ctx: &RequestContext,
        _opts: &DispatchOptions,
    ) -> StoreResult<Option<Value>> {
        match (ctx.method.as_str(), ctx.id.as_deref()) {
            // show
            ("GET", Some(id)) => match self.store.get(&self.namespace, id)? {
                Some(record) => Ok(Some(record)),
                None => Err(StoreError::NotFound),
            },

            // index
            ("GET", None) => {
                let rows = self.store.scan(&self.namespace)?;
                if rows.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(Value::Array(rows)))
                }
            }

            // create
            ("POST", _) => {
                let record = Self::stamp_id(ctx.body.clone(), None);
                let id = Self::record_id(&record)?;
                self.store.put(&self.namespace, &id, &record)?;
                Ok(Some(record))
            }

            // update (full replace)
            ("PUT", Some(id)) => {
                let record = Self::stamp_id(ctx.body.clone(), Some(id));
                self.store.put(&self.namespace, id, &record)?;
                Ok(Some(record))
            }

            // delete; removing an already-absent record is still a success
            ("DELETE", Some(id)) => {
                self.store.delete(&self.namespace, id)?;
                Ok(None)
            }

            (method, _) => Err(StoreError::Backend(format!(
                "method {method} is not routable here"
            ))),
        }
    }

    /// Ensure the record carries an `id` field, generating one if needed
    fn stamp_id(body: Option<Value>, id: Option<&str>) -> Value {
        let mut record = body.unwrap_or_else(|| Value::Object(Default::default()));

        if let Some(obj) = record.as_object_mut() {
            let id = match id {
                Some(id) => id.to_string(),
                None => obj
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string)
                    .unwrap_or_else(|| Uuid::new_v4().to_string()),
            };
            obj.insert("id".to_string(), Value::String(id));
        }
        record
    }

    fn record_id(record: &Value) -> StoreResult<String> {
        record
            .get("id")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::Backend("record body must be a JSON object".to_string()))
    }
}
