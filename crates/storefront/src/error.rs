//! Unified error handling for route handlers.
//!
//! Provides an `AppError` type that logs server-side detail and responds
//! with a client-safe message. Nothing here is fatal to the process: per
//! the demo's failure policy every error degrades to an informative
//! response rather than a crash.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::config::UnknownEndpoint;
use crate::payment::PaymentError;
use crate::storage::StorageError;
use crate::store::UnknownProduct;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A cart operation referenced an id the catalog does not have.
    /// Programmer error: the UI only offers catalog products.
    #[error("unknown product: {0}")]
    UnknownProduct(#[from] UnknownProduct),

    /// An endpoint name outside the configured table was requested.
    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(#[from] UnknownEndpoint),

    /// The checkout gateway call failed.
    #[error("payment error: {0}")]
    Payment(#[from] PaymentError),

    /// The key-value storage backend failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Bad request from client.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Server-side detail goes to the log, not the client.
        match &self {
            Self::UnknownEndpoint(_) | Self::Storage(_) | Self::Internal(_) => {
                tracing::error!(error = %self, "request error");
            }
            Self::UnknownProduct(_) | Self::Payment(_) | Self::BadRequest(_) => {
                tracing::warn!(error = %self, "request rejected");
            }
        }

        let status = match &self {
            Self::UnknownProduct(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Payment(_) => StatusCode::BAD_GATEWAY,
            Self::UnknownEndpoint(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = match &self {
            Self::UnknownProduct(_) => "Unknown product".to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::Payment(err) => err.user_message().to_string(),
            Self::UnknownEndpoint(_) | Self::Storage(_) | Self::Internal(_) => {
                "Internal server error".to_string()
            }
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
