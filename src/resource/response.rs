//! Response Translation
//!
//! Maps a storage dispatch outcome, combined with the original HTTP
//! method, to the HTTP status and body contract. This table is the
//! single source of truth for the core's HTTP semantics.

use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

use crate::context::RequestContext;
use crate::store::{StoreError, StoreResult};

/// Convert a dispatch outcome into the HTTP response.
///
/// Evaluated in order:
/// 1. not-found error        -> 404, generic message
/// 2. any other error        -> 500, generic message (detail logged only)
/// 3. no data, DELETE        -> 200 with the requested id
///    no data, other method  -> 404, generic message
/// 4. data                   -> 200 with the data as JSON
pub fn translate(ctx: &RequestContext, outcome: StoreResult<Option<Value>>) -> Response {
    match outcome {
        Err(StoreError::NotFound) => resource_not_found(),

        Err(StoreError::Backend(detail)) => {
            tracing::error!(
                request_id = %ctx.request_id,
                method = %ctx.method,
                path = %ctx.path,
                %detail,
                "storage dispatch failed"
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "internal server error" })),
            )
                .into_response()
        }

        Ok(None) if ctx.method == Method::DELETE => {
            let id = ctx.id.clone().unwrap_or_default();
            (StatusCode::OK, Json(json!({ "id": id }))).into_response()
        }

        Ok(None) => resource_not_found(),

        Ok(Some(data)) => (StatusCode::OK, Json(data)).into_response(),
    }
}

fn resource_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "resource not found" })),
    )
        .into_response()
}
