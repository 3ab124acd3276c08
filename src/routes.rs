// src/routes.rs

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{auth, quiz},
    state::AppState,
};

/// Assembles the main application router.
///
/// * Merges the auth and quiz sub-routers.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (services and config).
pub fn create_router(state: AppState) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    match state.config.cors_origin.parse::<HeaderValue>() {
        Ok(origin) => cors = cors.allow_origin(origin),
        Err(_) => tracing::warn!(
            "Ignoring invalid CORS_ORIGIN '{}'; cross-origin requests will be refused",
            state.config.cors_origin
        ),
    }

    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login));

    // Static segments win over `/{subject}`, so "leaderboard" is never a subject.
    let quiz_routes = Router::new()
        .route("/leaderboard", get(quiz::get_leaderboard))
        .route("/submit", post(quiz::submit_quiz))
        .route("/results/{user_id}", get(quiz::get_results))
        .route("/{subject}", get(quiz::get_questions));

    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api/quiz", quiz_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
