//! Id Blocklist Gate
//!
//! Rejects GET requests whose id segment is on a configured blocklist.

use std::future::Future;
use std::pin::Pin;

use axum::http::Method;

use crate::context::RequestContext;

use super::{ChainResult, Interceptor, Next, Rejection};

/// Gate that blocks reads of reserved ids.
///
/// Non-GET requests and ids not on the list pass through untouched.
pub struct IdBlocklist {
    ids: Vec<String>,
    rejection: Rejection,
}

impl IdBlocklist {
    /// Create a gate blocking the given ids
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>, rejection: Rejection) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
            rejection,
        }
    }

    /// Create a gate blocking a single id
    pub fn single(id: impl Into<String>, rejection: Rejection) -> Self {
        Self::new([id.into()], rejection)
    }
}

impl Interceptor for IdBlocklist {
    fn handle<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> Pin<Box<dyn Future<Output = ChainResult> + Send + 'a>> {
        Box::pin(async move {
            if ctx.method == Method::GET {
                if let Some(id) = &ctx.id {
                    if self.ids.iter().any(|blocked| blocked == id) {
                        tracing::warn!(
                            request_id = %ctx.request_id,
                            id = %id,
                            "blocked read of reserved id"
                        );
                        return Err(self.rejection.clone());
                    }
                }
            }
            next.run(ctx).await
        })
    }
}
