//! Store Error Types

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by a key-value backend.
///
/// `NotFound` is the only variant with dedicated HTTP semantics; every
/// other failure is collapsed to a generic server error at the edge,
/// with the detail kept for operator logs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// The target key does not exist
    #[error("key not found")]
    NotFound,

    /// Any other backend failure (I/O, malformed record, lock poisoning)
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    /// Create a backend failure from any displayable cause
    pub fn backend(cause: impl std::fmt::Display) -> Self {
        Self::Backend(cause.to_string())
    }
}
