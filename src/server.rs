//! HTTP Server
//!
//! Assembles the resource routers into one application router with the
//! process-wide fallback and CORS, then serves it.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::chain::{Chain, IdBlocklist, Rejection, Trace};
use crate::config::{ServerConfig, StoreBackend};
use crate::resource::{resource_router, ResourceDef};
use crate::store::{DiskStore, KeyValueStore, MemoryStore};

/// The restash HTTP server
pub struct AppServer {
    config: ServerConfig,
    router: Router,
}

impl AppServer {
    /// Create a server with the default interceptor chain
    pub fn new(config: ServerConfig) -> Self {
        Self::with_chain(config, default_chain())
    }

    /// Create a server with a custom interceptor chain; the store is
    /// selected from the configuration
    pub fn with_chain(config: ServerConfig, chain: Chain) -> Self {
        let store = store_from_config(&config);
        Self::with_store(config, chain, store)
    }

    /// Create a server with an explicit chain and store
    pub fn with_store(
        config: ServerConfig,
        chain: Chain,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let chain = Arc::new(chain);

        let mut router = Router::new();
        for resource in &config.resources {
            let def = ResourceDef::new(&resource.name).with_version(resource.version);
            router = router.merge(resource_router(def, Arc::clone(&chain), Arc::clone(&store)));
        }

        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let router = router.fallback(default_handler).layer(cors);

        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process exits
    pub async fn start(self) -> io::Result<()> {
        let addr: SocketAddr = self
            .config
            .socket_addr()
            .parse()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;

        tracing::info!(%addr, "restash listening");
        for resource in &self.config.resources {
            let def = ResourceDef::new(&resource.name).with_version(resource.version);
            tracing::info!(collection = %def.collection_path(), item = %def.item_path(), "resource bound");
        }

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router).await
    }
}

/// Process-wide handler for unmatched routes
async fn default_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "message": "nada butts here" })),
    )
        .into_response()
}

/// The chain the stock server runs: request logging, then the reserved-id
/// gate the API ships with
fn default_chain() -> Chain {
    Chain::new().with(Trace).with(IdBlocklist::single(
        "fake",
        Rejection::new(500, "What are you doing?"),
    ))
}

fn store_from_config(config: &ServerConfig) -> Arc<dyn KeyValueStore> {
    match config.store {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Disk => Arc::new(DiskStore::new(config.data_dir.clone())),
    }
}
