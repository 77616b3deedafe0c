//! Request Context
//!
//! Per-request value carried through the interceptor chain and into
//! storage dispatch. Owned by exactly one request flow; never shared
//! across requests.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::http::Method;
use serde_json::Value;
use uuid::Uuid;

/// Context for one in-flight request
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request ID for tracing
    pub request_id: Uuid,

    /// HTTP method of the incoming request
    pub method: Method,

    /// Matched route path (with the concrete id substituted)
    pub path: String,

    /// Route id segment, when the item route matched
    pub id: Option<String>,

    /// Route params plus query pairs; interceptors may attach derived fields
    pub params: BTreeMap<String, String>,

    /// Decoded JSON payload for POST/PUT
    pub body: Option<Value>,

    /// Start time for duration tracking
    started_at: Instant,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(
        method: Method,
        path: impl Into<String>,
        id: Option<String>,
        mut params: BTreeMap<String, String>,
        body: Option<Value>,
    ) -> Self {
        if let Some(id) = &id {
            params.insert("id".to_string(), id.clone());
        }
        Self {
            request_id: Uuid::new_v4(),
            method,
            path: path.into(),
            id,
            params,
            body,
            started_at: Instant::now(),
        }
    }

    /// Look up a route or query param
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// Attach a derived field; later interceptors and the dispatch observe it
    pub fn set_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.started_at.elapsed().as_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_lands_in_params() {
        let ctx = RequestContext::new(
            Method::GET,
            "/api/v1/post/42",
            Some("42".to_string()),
            BTreeMap::new(),
            None,
        );

        assert_eq!(ctx.param("id"), Some("42"));
        assert_eq!(ctx.id.as_deref(), Some("42"));
    }

    #[test]
    fn test_collection_context_has_no_id() {
        let ctx = RequestContext::new(
            Method::GET,
            "/api/v1/post",
            None,
            BTreeMap::new(),
            None,
        );

        assert!(ctx.id.is_none());
        assert!(ctx.param("id").is_none());
    }

    #[test]
    fn test_attached_fields_are_visible() {
        let mut ctx = RequestContext::new(
            Method::POST,
            "/api/v1/post",
            None,
            BTreeMap::new(),
            Some(serde_json::json!({"title": "hello"})),
        );

        ctx.set_param("caller", "gateway");
        assert_eq!(ctx.param("caller"), Some("gateway"));
    }
}
