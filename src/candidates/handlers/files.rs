// src/candidates/handlers/files.rs
//! File proxying and PDF generation

use axum::{
    body::Body,
    extract::{Extension, Query},
    http::{header, StatusCode},
    response::{Json, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::Session;
use crate::common::{ApiError, AppState};
use crate::profile::models::ResumeDoc;

const MAX_PROXY_BYTES: u64 = 25 * 1024 * 1024;

#[derive(Debug, Deserialize)]
pub struct ProxyFileQuery {
    pub url: String,
}

/// GET /api/proxy-file?url= - Fetch a stored file server-side so the
/// browser can read it without a cross-origin fetch.
///
/// Only http/https URLs are accepted; anything else is rejected before any
/// request is made.
pub async fn proxy_file(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Query(query): Query<ProxyFileQuery>,
) -> Result<Response, ApiError> {
    let url = query.url.trim();
    if !url.starts_with("http://") && !url.starts_with("https://") {
        warn!(user_id = %session.user_id, "Rejected proxy request for non-http URL");
        return Err(ApiError::BadRequest(
            "Only http and https URLs can be proxied".to_string(),
        ));
    }

    let state = state_lock.read().await.clone();

    let upstream = state.http.get(url).send().await.map_err(|e| {
        error!(user_id = %session.user_id, error = %e, "Proxy fetch failed");
        ApiError::ServiceUnavailable("Could not fetch the requested file".to_string())
    })?;

    if !upstream.status().is_success() {
        return Err(ApiError::NotFound(format!(
            "Upstream returned {}",
            upstream.status()
        )));
    }

    if let Some(length) = upstream.content_length() {
        if length > MAX_PROXY_BYTES {
            return Err(ApiError::BadRequest(
                "File is too large to proxy".to_string(),
            ));
        }
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string();

    let bytes = upstream.bytes().await.map_err(|e| {
        error!(user_id = %session.user_id, error = %e, "Proxy body read failed");
        ApiError::ServiceUnavailable("Could not read the requested file".to_string())
    })?;

    info!(
        user_id = %session.user_id,
        bytes = bytes.len(),
        content_type = %content_type,
        "File proxied"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(bytes))
        .map_err(|e| ApiError::InternalServer(e.to_string()))
}

/// POST /api/generate-resume-pdf - Render a structured resume as a PDF
pub async fn generate_resume_pdf(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(resume): Json<ResumeDoc>,
) -> Result<Response, ApiError> {
    let state = state_lock.read().await.clone();

    let pdf = state.pdf_service.render_resume(&resume).map_err(|e| {
        error!(user_id = %session.user_id, error = %e, "Resume PDF rendering failed");
        ApiError::InternalServer("Failed to generate the resume PDF".to_string())
    })?;

    info!(
        user_id = %session.user_id,
        bytes = pdf.len(),
        "Resume PDF generated"
    );

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/pdf")
        .header(
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"resume.pdf\"",
        )
        .body(Body::from(pdf))
        .map_err(|e| ApiError::InternalServer(e.to_string()))
}
