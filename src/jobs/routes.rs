// src/jobs/routes.rs

use axum::{
    routing::{get, patch, post, put},
    Router,
};

use super::handlers::{self, ai};

/// Create the jobs router with all job-related routes
pub fn jobs_routes() -> Router {
    Router::new()
        // Public routes
        .route("/api/jobs", get(handlers::list_jobs))
        .route("/api/jobs/:id", get(handlers::get_job_by_id))
        .route("/api/jobs/:id/view", post(handlers::track_job_view))
        // AI job analysis
        .route("/api/job-analyzer", post(ai::analyze_job))
        // Recruiter job management routes
        .route(
            "/api/recruiter/jobs",
            get(handlers::list_own_jobs).post(handlers::create_job),
        )
        .route("/api/recruiter/jobs/:id", put(handlers::update_job))
        .route(
            "/api/recruiter/jobs/:id/status",
            patch(handlers::update_job_status),
        )
}
