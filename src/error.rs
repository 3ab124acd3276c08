// src/error.rs

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;

/// Global Application Error Enum.
/// Centralizes error handling and mapping to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    // 404 Not Found (unknown email or record)
    NotFound(String),

    // 401 Unauthorized (password mismatch)
    InvalidCredentials(String),

    // 409 Conflict (email already registered)
    DuplicateEmail(String),

    // 400 Bad Request (body could not be decoded or failed field validation)
    MalformedRequest(String),

    // 500 Internal Server Error (store / I-O failure)
    StorageError(String),

    // 500 Internal Server Error (anything else, e.g. hashing)
    InternalServerError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "not found: {}", msg),
            AppError::InvalidCredentials(msg) => write!(f, "invalid credentials: {}", msg),
            AppError::DuplicateEmail(msg) => write!(f, "duplicate email: {}", msg),
            AppError::MalformedRequest(msg) => write!(f, "malformed request: {}", msg),
            AppError::StorageError(msg) => write!(f, "storage error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Implements `IntoResponse` for `AppError`.
/// Converts the error into a JSON response with appropriate HTTP status code.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::StorageError(msg) => {
                tracing::error!("Storage error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Storage unavailable" }),
                )
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal Server Error" }),
                )
            }
            AppError::MalformedRequest(details) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Invalid request format", "details": details }),
            ),
            AppError::InvalidCredentials(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::DuplicateEmail(msg) => (StatusCode::CONFLICT, json!({ "error": msg })),
        };

        (status, Json(body)).into_response()
    }
}

/// Converts `sqlx::Error` into `AppError::StorageError`.
/// Allows using `?` operator on database queries.
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        AppError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedRequest(err.to_string())
    }
}

/// Lets handlers take `Result<Json<T>, JsonRejection>` and answer with the
/// structured 400 body instead of axum's plain-text rejection.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::MalformedRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::MalformedRequest(errors.to_string())
    }
}
