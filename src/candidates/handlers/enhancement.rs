// src/candidates/handlers/enhancement.rs
//! Job-tailored resume enhancement

use axum::{extract::Extension, response::Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::auth::Session;
use crate::candidates::enhancement::{generate_change_highlights, EnhancementSession};
use crate::candidates::models::{EnhanceResumeRequest, EnhanceResumeResponse, JobContext};
use crate::candidates::validators::EnhanceValidator;
use crate::common::{ApiError, AppState, Validator};
use crate::profile::models::{ResumeDoc, ResumeRecord};
use crate::services::{GenAiError, GenerationPurpose};

fn map_genai_error(e: GenAiError) -> ApiError {
    match e {
        GenAiError::NotConfigured => {
            ApiError::ServiceUnavailable("Resume enhancement is not configured".to_string())
        }
        GenAiError::RateLimitExceeded => {
            ApiError::ServiceUnavailable("Enhancement service is busy, try again shortly".to_string())
        }
        GenAiError::RequestFailed(_) => {
            ApiError::ServiceUnavailable("Enhancement service is unavailable".to_string())
        }
        GenAiError::InvalidResponse(_) => {
            ApiError::ProcessingError("Failed to generate an enhanced resume".to_string())
        }
    }
}

fn build_prompt(resume: &ResumeDoc, job: &JobContext, resume_json: &str) -> String {
    format!(
        "Tailor the following resume to the job below. Reply with exactly one JSON \
        object with the same shape as the input resume (keys: personal_info, summary, \
        skills, experience, education, projects, certifications).\n\
        Rules:\n\
        - Never invent employers, dates, or credentials.\n\
        - Keep every skill the candidate listed; you may add skills clearly supported \
        by their experience.\n\
        - Rewrite the summary and experience descriptions to emphasize relevance.\n\n\
        JOB TITLE: {}\n\
        COMPANY: {}\n\
        EXPERIENCE LEVEL: {}\n\
        REQUIRED SKILLS: {}\n\
        DESCRIPTION:\n{}\n\
        REQUIREMENTS:\n{}\n\n\
        RESUME ({} experience entries):\n{}",
        job.title,
        job.company.as_deref().unwrap_or("unspecified"),
        job.experience_level.as_deref().unwrap_or("unspecified"),
        job.skills.join(", "),
        job.description.as_deref().unwrap_or(""),
        job.requirements.as_deref().unwrap_or(""),
        resume.experience.len(),
        resume_json
    )
}

/// POST /api/resume-enhancer
///
/// Resolves the resume source (inline document or a saved resume id),
/// generates a tailored variant, and returns it together with the computed
/// change highlights. Nothing is persisted here; saving is a separate,
/// explicit call.
pub async fn enhance_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(request): Json<EnhanceResumeRequest>,
) -> Result<Json<EnhanceResumeResponse>, ApiError> {
    let validator = EnhanceValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %session.user_id,
            errors = ?validation_result.errors,
            "Enhancement validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let state = state_lock.read().await.clone();

    let original: ResumeDoc = match (request.resume, &request.resume_id) {
        (Some(resume), _) => resume,
        (None, Some(resume_id)) => {
            let record = sqlx::query_as::<_, ResumeRecord>(
                "SELECT id, user_id, label, data, source_resume_id, tailored_job_id, created_at \
                 FROM resumes WHERE id = ? AND user_id = ?",
            )
            .bind(resume_id)
            .bind(&session.user_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?
            .ok_or_else(|| ApiError::NotFound(format!("Resume not found: {}", resume_id)))?;

            serde_json::from_str(&record.data)
                .map_err(|e| ApiError::InternalServer(e.to_string()))?
        }
        (None, None) => {
            return Err(ApiError::ValidationError(
                "Either resume or resume_id is required".to_string(),
            ))
        }
    };

    let resume_json = serde_json::to_string_pretty(&original)
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;
    let prompt = build_prompt(&original, &request.job, &resume_json);

    let mut enhancement = EnhancementSession::new();
    enhancement
        .start_enhancing()
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;

    info!(
        user_id = %session.user_id,
        job_title = %request.job.title,
        "Enhancing resume"
    );

    let value = match state
        .genai_service
        .generate_json(GenerationPurpose::ResumeEnhancement, &prompt)
        .await
    {
        Ok(value) => value,
        Err(e) => {
            error!(user_id = %session.user_id, error = %e, "Resume enhancement generation failed");
            let _ = enhancement.fail(e.to_string());
            return Err(map_genai_error(e));
        }
    };

    // Structural compatibility check: the reply must deserialize as a
    // complete resume document.
    let enhanced: ResumeDoc = match serde_json::from_value(value) {
        Ok(doc) => doc,
        Err(e) => {
            error!(user_id = %session.user_id, error = %e, "Enhanced resume did not match the expected shape");
            let _ = enhancement.fail(e.to_string());
            return Err(ApiError::ProcessingError(
                "Failed to generate an enhanced resume".to_string(),
            ));
        }
    };

    enhancement
        .complete()
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;

    let highlights = generate_change_highlights(&original, &enhanced, &request.job.skills);

    info!(
        user_id = %session.user_id,
        highlights = highlights.len(),
        "Resume enhanced"
    );

    Ok(Json(EnhanceResumeResponse {
        resume: enhanced,
        highlights,
    }))
}
