//! Resource Module
//!
//! Binds a named resource to the four standard CRUD routes and drives
//! every matching request through the interceptor chain, the storage
//! adapter, and the response translator.

use axum::routing::MethodRouter;

pub mod adapter;
pub mod response;
pub mod router;

pub use adapter::{DispatchOptions, StorageAdapter, ValueEncoding};
pub use response::translate;
pub use router::resource_router;

/// An extra route registered directly to its own handler, bypassing the
/// generic dispatch path. Method selection lives in the `MethodRouter`.
pub struct OverwriteRoute {
    /// Route path, absolute
    pub path: String,
    /// Handler bound to the route
    pub handler: MethodRouter,
}

/// Definition of one CRUD resource.
///
/// Immutable once registered; created at startup.
pub struct ResourceDef {
    /// Resource name; becomes the route segment and the store namespace
    pub name: String,
    /// API version, part of the route prefix
    pub version: u32,
    /// Optional route special-cased past the generic handler
    pub overwrite: Option<OverwriteRoute>,
}

impl ResourceDef {
    /// Create a resource at the default version 1
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: 1,
            overwrite: None,
        }
    }

    /// Set the API version
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    /// Special-case one route past the generic dispatch path
    pub fn with_overwrite(mut self, path: impl Into<String>, handler: MethodRouter) -> Self {
        self.overwrite = Some(OverwriteRoute {
            path: path.into(),
            handler,
        });
        self
    }

    /// Collection route: `/api/v{version}/{name}`
    pub fn collection_path(&self) -> String {
        format!("/api/v{}/{}", self.version, self.name)
    }

    /// Item route: collection path plus `/:id`
    pub fn item_path(&self) -> String {
        format!("{}/:id", self.collection_path())
    }
}
