//! Resource Router
//!
//! Registers the collection and item route groups for one resource and
//! arbitrates each request between the interceptor chain and the
//! storage adapter. Registering the same path/method pair twice is a
//! caller error; the underlying router rejects the conflict.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::Method;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::Value;

use crate::chain::Chain;
use crate::context::RequestContext;
use crate::store::KeyValueStore;

use super::adapter::{DispatchOptions, StorageAdapter};
use super::response::translate;
use super::ResourceDef;

/// Shared per-resource state
struct ResourceState {
    collection_path: String,
    chain: Arc<Chain>,
    adapter: StorageAdapter,
}

type Shared = Arc<ResourceState>;

/// Build the router for one resource definition.
///
/// Registers GET/POST on the collection path and GET/PUT/DELETE on the
/// item path; an overwrite route, when present, is registered directly
/// to its own handler.
pub fn resource_router(
    mut def: ResourceDef,
    chain: Arc<Chain>,
    store: Arc<dyn KeyValueStore>,
) -> Router {
    let collection_path = def.collection_path();
    let item_path = def.item_path();
    let overwrite = def.overwrite.take();

    let state = Arc::new(ResourceState {
        collection_path: collection_path.clone(),
        chain,
        adapter: StorageAdapter::new(def.name, store),
    });

    // index, create
    let mut router = Router::new()
        .route(&collection_path, get(index).post(create))
        // show, update, delete
        .route(&item_path, get(show).put(update).delete(remove))
        .with_state(state);

    if let Some(overwrite) = overwrite {
        router = router.route(&overwrite.path, overwrite.handler);
    }
    router
}

async fn index(
    State(state): State<Shared>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let path = state.collection_path.clone();
    let ctx = RequestContext::new(Method::GET, path, None, query, None);
    dispatch(state, ctx).await
}

async fn create(
    State(state): State<Shared>,
    Query(query): Query<BTreeMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let path = state.collection_path.clone();
    let ctx = RequestContext::new(Method::POST, path, None, query, Some(body));
    dispatch(state, ctx).await
}

async fn show(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let path = format!("{}/{}", state.collection_path, id);
    let ctx = RequestContext::new(Method::GET, path, Some(id), query, None);
    dispatch(state, ctx).await
}

async fn update(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    let path = format!("{}/{}", state.collection_path, id);
    let ctx = RequestContext::new(Method::PUT, path, Some(id), query, Some(body));
    dispatch(state, ctx).await
}

async fn remove(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Query(query): Query<BTreeMap<String, String>>,
) -> Response {
    let path = format!("{}/{}", state.collection_path, id);
    let ctx = RequestContext::new(Method::DELETE, path, Some(id), query, None);
    dispatch(state, ctx).await
}

/// Walk the chain, then hand the request to the storage adapter.
///
/// A rejection ends the request with its own code and message; the
/// adapter is never invoked for a rejected request.
async fn dispatch(state: Shared, mut ctx: RequestContext) -> Response {
    if let Err(rejection) = state.chain.walk(&mut ctx).await {
        return rejection.into_response();
    }

    let opts = DispatchOptions::from_context(&ctx);
    let outcome = state.adapter.dispatch(&ctx, &opts).await;
    translate(&ctx, outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_router_builds() {
        let def = ResourceDef::new("post");
        let chain = Arc::new(Chain::new());
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let _router = resource_router(def, chain, store);
    }

    #[test]
    fn test_router_builds_with_overwrite() {
        let def = ResourceDef::new("post")
            .with_overwrite("/api/v1/post-archive", get(|| async { "archived" }));
        let chain = Arc::new(Chain::new());
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());

        let _router = resource_router(def, chain, store);
    }
}
