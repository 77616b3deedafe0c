//! restash - generic CRUD resources over HTTP, backed by a pluggable
//! key-value store
//!
//! A named resource becomes the four standard CRUD routes. Every
//! matching request walks an ordered interceptor chain, then a storage
//! adapter performs the implied key-value operation, and the outcome is
//! translated into the HTTP status/body contract.

pub mod chain;
pub mod cli;
pub mod config;
pub mod context;
pub mod resource;
pub mod server;
pub mod store;
