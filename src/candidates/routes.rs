// src/candidates/routes.rs

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;

/// Create the candidates router: applications plus the resume toolchain
pub fn candidates_routes() -> Router {
    Router::new()
        .route(
            "/api/applications",
            get(handlers::get_user_applications).post(handlers::create_application),
        )
        .route(
            "/api/recruiter/jobs/:id/applications",
            get(handlers::list_job_applications),
        )
        .route("/api/resume-parser", post(handlers::parse_resume))
        .route("/api/resume-enhancer", post(handlers::enhance_resume))
        .route("/api/generate-resume-pdf", post(handlers::generate_resume_pdf))
        .route("/api/proxy-file", get(handlers::proxy_file))
}
