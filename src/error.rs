//! Error types for the cache layer
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for cache operations.
///
/// `NotFound` is the only recoverable condition. Everything else is passed
/// through to the caller as-is.
#[derive(Error, Debug)]
pub enum CacheError {
    /// No live entry exists for the key
    #[error("Cache not found: {0}")]
    NotFound(String),

    /// A strategy method was called on the placeholder strategy
    #[error("Called #{method} on base strategy")]
    Unsupported { method: &'static str },

    /// The backing key-value store failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal error, typically raised by a value supplier
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CacheError {
    /// Returns true for the "no live entry" condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CacheError::NotFound(_))
    }
}

// == Store Error Enum ==
/// Errors reported by an external key-value store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The sled backend failed
    #[error("Store backend error: {0}")]
    Backend(#[from] sled::Error),

    /// A stored item could not be encoded or decoded
    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The store could not be reached
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Unsupported { .. } | CacheError::Store(_) | CacheError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
