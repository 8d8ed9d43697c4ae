// src/candidates/handlers/resumes.rs
//! PDF resume upload and structuring

use axum::{extract::Extension, extract::Multipart, response::Json};
use bytes::Bytes;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::Session;
use crate::candidates::models::ParseResumeResponse;
use crate::common::{ApiError, AppState};
use crate::profile::models::ResumeDoc;
use crate::services::GenerationPurpose;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// POST /api/resume-parser - Upload a PDF resume and get back a structured
/// document.
///
/// The upload is sniffed by content, not by extension or declared type;
/// only real PDFs reach the extractor.
pub async fn parse_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    mut multipart: Multipart,
) -> Result<Json<ParseResumeResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let mut file_bytes: Option<Bytes> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::UploadError(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::UploadError(e.to_string()))?;
            file_bytes = Some(data);
        }
    }

    let bytes = file_bytes
        .ok_or_else(|| ApiError::UploadError("Missing 'file' field in upload".to_string()))?;

    if bytes.is_empty() {
        return Err(ApiError::UploadError("Uploaded file is empty".to_string()));
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ApiError::UploadError(
            "Uploaded file exceeds the 10MB limit".to_string(),
        ));
    }

    let kind = infer::get(&bytes);
    if kind.map(|k| k.mime_type()) != Some("application/pdf") {
        warn!(
            user_id = %session.user_id,
            detected = ?kind.map(|k| k.mime_type()),
            "Rejected non-PDF resume upload"
        );
        return Err(ApiError::UploadError(
            "Only PDF resumes are supported".to_string(),
        ));
    }

    let text = state.pdf_service.extract_text(&bytes).map_err(|e| {
        error!(user_id = %session.user_id, error = %e, "Resume text extraction failed");
        ApiError::ProcessingError("Could not read text from the uploaded PDF".to_string())
    })?;

    if text.trim().is_empty() {
        return Err(ApiError::ProcessingError(
            "The uploaded PDF contains no extractable text".to_string(),
        ));
    }

    info!(
        user_id = %session.user_id,
        pdf_bytes = bytes.len(),
        text_chars = text.len(),
        "Parsing uploaded resume"
    );

    let prompt = format!(
        "Structure the following resume text as exactly one JSON object with these keys:\n\
        - \"personal_info\": {{\"name\", \"email\", \"phone\", \"location\"}}\n\
        - \"summary\": string or null\n\
        - \"skills\": array of strings\n\
        - \"experience\": array of {{\"title\", \"company\", \"start_date\", \"end_date\", \
        \"description\", \"achievements\"}}\n\
        - \"education\": array of {{\"institution\", \"degree\", \"field_of_study\", \
        \"start_date\", \"end_date\"}}\n\
        - \"projects\": array of {{\"name\", \"description\", \"url\", \"technologies\"}}\n\
        - \"certifications\": array of {{\"name\", \"issuer\", \"year\"}}\n\
        Only use information present in the text; omit what is not there.\n\n\
        RESUME TEXT:\n{}",
        text
    );

    let value = state
        .genai_service
        .generate_json(GenerationPurpose::ResumeStructuring, &prompt)
        .await
        .map_err(|e| {
            error!(user_id = %session.user_id, error = %e, "Resume structuring failed");
            ApiError::ProcessingError("Failed to structure the resume".to_string())
        })?;

    let resume: ResumeDoc = serde_json::from_value(value).map_err(|e| {
        error!(user_id = %session.user_id, error = %e, "Structured resume did not match the expected shape");
        ApiError::ProcessingError("Failed to structure the resume".to_string())
    })?;

    info!(
        user_id = %session.user_id,
        skills = resume.skills.len(),
        experience_entries = resume.experience.len(),
        "Resume parsed"
    );

    Ok(Json(ParseResumeResponse {
        success: true,
        resume,
    }))
}
