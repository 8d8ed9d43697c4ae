// src/profile/routes.rs

use axum::{
    routing::get,
    Router,
};

use super::handlers;

/// Create the profile router
pub fn profile_routes() -> Router {
    Router::new()
        .route(
            "/api/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        .route(
            "/api/profile/resumes",
            get(handlers::list_resumes).post(handlers::save_resume),
        )
}
