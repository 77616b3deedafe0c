//! Interceptor Chain
//!
//! Ordered pre-dispatch interceptors for all resource routes.
//! Each interceptor either passes control onward or short-circuits
//! the request with its own status and message.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::context::RequestContext;

pub mod gate;
pub mod trace;

pub use gate::IdBlocklist;
pub use trace::Trace;

/// Result of one chain walk
pub type ChainResult = Result<(), Rejection>;

/// A short-circuit produced by an interceptor.
///
/// Forwarded verbatim as the HTTP response; the response translator
/// never sees a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rejection {
    /// HTTP status code
    pub code: u16,
    /// Message returned to the client
    pub message: String,
}

impl Rejection {
    /// Create a new rejection
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "message": self.message }))).into_response()
    }
}

/// Remaining interceptors after the current one.
///
/// Consumed by value: an interceptor continues the walk exactly once by
/// calling `run`, or ends it by returning without calling `run`.
pub struct Next<'a> {
    interceptors: &'a [Arc<dyn Interceptor>],
}

impl<'a> Next<'a> {
    /// Run the next interceptor, or finish the walk when none remain
    pub fn run(
        self,
        ctx: &'a mut RequestContext,
    ) -> Pin<Box<dyn Future<Output = ChainResult> + Send + 'a>> {
        Box::pin(async move {
            if let Some((first, rest)) = self.interceptors.split_first() {
                let next = Next { interceptors: rest };
                first.handle(ctx, next).await
            } else {
                Ok(())
            }
        })
    }
}

/// A pre-dispatch interceptor.
///
/// Interceptors run in registration order and may mutate the context
/// before passing it on; later interceptors and the storage dispatch
/// observe those mutations.
pub trait Interceptor: Send + Sync {
    /// Inspect the request, then either continue via `next.run(ctx)` or
    /// return a `Rejection` to end the request here
    fn handle<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> Pin<Box<dyn Future<Output = ChainResult> + Send + 'a>>;
}

/// Ordered interceptor chain shared by every route of a server
#[derive(Default)]
pub struct Chain {
    interceptors: Vec<Arc<dyn Interceptor>>,
}

impl Chain {
    /// Create an empty chain
    pub fn new() -> Self {
        Self {
            interceptors: Vec::new(),
        }
    }

    /// Append an interceptor; first added runs first
    pub fn with(mut self, interceptor: impl Interceptor + 'static) -> Self {
        self.interceptors.push(Arc::new(interceptor));
        self
    }

    /// Number of registered interceptors
    pub fn len(&self) -> usize {
        self.interceptors.len()
    }

    /// Whether the chain has no interceptors
    pub fn is_empty(&self) -> bool {
        self.interceptors.is_empty()
    }

    /// Walk the chain against one request context.
    ///
    /// Stops at the first rejection; an empty chain resolves immediately.
    pub async fn walk(&self, ctx: &mut RequestContext) -> ChainResult {
        let next = Next {
            interceptors: &self.interceptors,
        };
        next.run(ctx).await
    }
}
