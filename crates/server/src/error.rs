//! Unified error handling for route handlers.
//!
//! Provides a unified `AppError` that maps every service error onto an
//! HTTP status and a JSON `{"error": ...}` body. All route handlers should
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{CatalogError, FeedbackError, MigrationError, OrderError};

/// Application-level error type for the canteen server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Catalog operation failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Order operation failed.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Guest or migration operation failed.
    #[error(transparent)]
    Migration(#[from] MigrationError),

    /// Feedback operation failed.
    #[error(transparent)]
    Feedback(#[from] FeedbackError),

    /// Caller lacks the required role.
    #[error("forbidden")]
    Forbidden,

    /// Bad request from client.
    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Catalog(err) => match err {
                CatalogError::NotFound => StatusCode::NOT_FOUND,
                CatalogError::InvalidStock(_) => StatusCode::BAD_REQUEST,
            },
            Self::Order(err) => match err {
                OrderError::NotFound => StatusCode::NOT_FOUND,
                OrderError::EmptyOrder
                | OrderError::InvalidItem(_)
                | OrderError::OutOfStock(_)
                | OrderError::InvalidTransition { .. } => StatusCode::BAD_REQUEST,
            },
            Self::Migration(err) => match err {
                MigrationError::GuestNotFound | MigrationError::OrderNotFound(_) => {
                    StatusCode::NOT_FOUND
                }
                MigrationError::AlreadyExists => StatusCode::CONFLICT,
                MigrationError::InvalidEmail(_) | MigrationError::WeakPassword(_) => {
                    StatusCode::BAD_REQUEST
                }
                MigrationError::PasswordHash => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Feedback(err) => match err {
                FeedbackError::OrderNotFound => StatusCode::NOT_FOUND,
                FeedbackError::InvalidRating(_) => StatusCode::BAD_REQUEST,
            },
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        // Don't expose hashing internals to clients.
        let message = match &self {
            Self::Migration(MigrationError::PasswordHash) => "internal server error".to_owned(),
            _ => self.to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
