// src/auth/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the auth router
pub fn auth_routes() -> Router {
    Router::new()
        .route("/api/auth/google", post(handlers::google_auth))
        .route("/api/auth/me", get(handlers::me))
}
