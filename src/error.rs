// SPDX-License-Identifier: MIT

//! Application error types with consistent API responses.
//!
//! The authentication failure kinds (`Unauthenticated`, `SessionExpired`,
//! `InvalidToken`, `UserNotFound`) are kept distinct internally so tests
//! and logs can tell them apart, but they all collapse into the same
//! `401 unauthorized` response body on the wire.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No credential presented")]
    Unauthenticated,

    #[error("Session expired")]
    SessionExpired,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Token subject references no user")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("OAuth exchange error: {0}")]
    OauthExchange(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::Unauthenticated
            | AppError::SessionExpired
            | AppError::InvalidToken
            | AppError::UserNotFound => {
                tracing::debug!(kind = ?self, "Authentication denied");
                (StatusCode::UNAUTHORIZED, "unauthorized", None)
            }
            AppError::InvalidCredentials => {
                (StatusCode::UNAUTHORIZED, "invalid_credentials", None)
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", Some(msg.clone())),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::OauthExchange(msg) => {
                tracing::warn!(error = %msg, "OAuth exchange failed");
                (StatusCode::BAD_GATEWAY, "oauth_exchange_error", None)
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
