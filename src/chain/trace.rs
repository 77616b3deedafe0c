//! Trace Interceptor
//!
//! Logs every request entering the dispatch path. Never rejects.

use std::future::Future;
use std::pin::Pin;

use crate::context::RequestContext;

use super::{ChainResult, Interceptor, Next};

/// Request logging interceptor
pub struct Trace;

impl Interceptor for Trace {
    fn handle<'a>(
        &'a self,
        ctx: &'a mut RequestContext,
        next: Next<'a>,
    ) -> Pin<Box<dyn Future<Output = ChainResult> + Send + 'a>> {
        Box::pin(async move {
            tracing::info!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                "request"
            );
            next.run(ctx).await
        })
    }
}
