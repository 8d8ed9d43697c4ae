// src/notifications/routes.rs

use axum::{routing::get, Router};

use super::handlers;

pub fn notifications_routes() -> Router {
    Router::new().route(
        "/api/notifications/types",
        get(handlers::get_notification_type_counts),
    )
}
