// src/jobs/handlers/ai.rs
//! AI-powered job posting analysis

use axum::{Extension, Json};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::common::{ApiError, AppState, Validator};
use crate::jobs::models::{JobAnalysis, JobAnalysisResponse, JobAnalyzeRequest};
use crate::jobs::validators::JobAnalyzeValidator;
use crate::services::GenerationPurpose;

/// POST /api/job-analyzer
///
/// Sends the posting description through the generation service and parses
/// the single JSON object expected in the reply. A reply without a parseable
/// object is a processing error, not a bad request.
pub async fn analyze_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(request): Json<JobAnalyzeRequest>,
) -> Result<Json<JobAnalysisResponse>, ApiError> {
    let validator = JobAnalyzeValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            errors = ?validation_result.errors,
            "Job analysis validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let state = state_lock.read().await;

    info!(
        description_chars = request.description.len(),
        "Analyzing job description"
    );

    let prompt = format!(
        "Analyze the following job description and reply with exactly one JSON object \
        with these keys:\n\
        - \"skills\": array of skill names the posting asks for\n\
        - \"improvementTips\": array of short suggestions to improve the posting\n\
        - \"qualityScore\": integer 0-100 rating the posting's clarity and completeness\n\
        - \"jobSimulation\": a short second-person narrative of a typical day in this role\n\
        - \"keyQualifications\": array of the most important qualifications\n\n\
        JOB DESCRIPTION:\n{}",
        request.description
    );

    let value = state
        .genai_service
        .generate_json(GenerationPurpose::JobAnalysis, &prompt)
        .await
        .map_err(|e| {
            error!(error = %e, "Job analysis generation failed");
            ApiError::InternalServer("Failed to parse job analysis data".to_string())
        })?;

    let analysis: JobAnalysis = serde_json::from_value(value).map_err(|e| {
        error!(error = %e, "Job analysis JSON did not match the expected shape");
        ApiError::InternalServer("Failed to parse job analysis data".to_string())
    })?;

    info!(
        skills = analysis.skills.len(),
        quality_score = analysis.quality_score,
        "Job analysis completed"
    );

    Ok(Json(JobAnalysisResponse {
        success: true,
        skills: analysis.skills,
        improvement_tips: analysis.improvement_tips,
        quality_score: analysis.quality_score.min(100),
        job_simulation: analysis.job_simulation,
        key_qualifications: analysis.key_qualifications,
    }))
}
