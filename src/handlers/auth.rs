// src/handlers/auth.rs

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
};
use validator::Validate;

use crate::{
    error::AppError,
    models::user::{LoginRequest, RegisterRequest},
    services::AccountService,
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created and the user object (excluding password).
pub async fn register(
    State(accounts): State<AccountService>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let user = accounts.register(payload).await?;

    Ok((StatusCode::CREATED, Json(user)))
}

/// Authenticates a user by email and password.
///
/// 404 when the email is unknown, 401 when the password does not match.
pub async fn login(
    State(accounts): State<AccountService>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Json(payload) = payload?;

    let user = accounts.login(&payload.email, &payload.password).await?;

    Ok(Json(user))
}
