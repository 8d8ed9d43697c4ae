// src/candidates/handlers/applications.rs
//! Job application submission and listings

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::{Role, Session};
use crate::candidates::models::*;
use crate::candidates::validators::ApplicationValidator;
use crate::common::{
    generate_application_id, generate_notification_id, ApiError, AppState, Validator,
};

const APPLICATION_COLUMNS: &str = r#"
    id, job_id, applicant_id, recruiter_id, resume_id, resume_url, summary,
    cover_letter, status, applied_at, updated_at
"#;

/// POST /api/applications - Apply to a job
///
/// A pre-check on (applicant_id, job_id) rejects a second submission to the
/// same listing before any write happens.
pub async fn create_application(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<Json<Application>, ApiError> {
    session.require_role(Role::Applicant)?;
    let state = state_lock.read().await.clone();

    let validator = ApplicationValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %session.user_id,
            errors = ?validation_result.errors,
            "Application validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let job: Option<(String, String)> =
        sqlx::query_as("SELECT id, recruiter_id FROM jobs WHERE id = ? AND status = 'active'")
            .bind(&request.job_id)
            .fetch_optional(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
    let (job_id, recruiter_id) = job.ok_or_else(|| {
        ApiError::NotFound(format!("Job not found or inactive: {}", request.job_id))
    })?;

    let existing: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM applications WHERE applicant_id = ? AND job_id = ?",
    )
    .bind(&session.user_id)
    .bind(&job_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    if existing > 0 {
        warn!(
            user_id = %session.user_id,
            job_id = %job_id,
            "Duplicate application rejected"
        );
        return Err(ApiError::BadRequest(
            "You have already applied to this job".to_string(),
        ));
    }

    if let Some(resume_id) = &request.resume_id {
        let owned: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM resumes WHERE id = ? AND user_id = ?")
                .bind(resume_id)
                .bind(&session.user_id)
                .fetch_one(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?;
        if owned == 0 {
            return Err(ApiError::NotFound(format!(
                "Resume not found: {}",
                resume_id
            )));
        }
    }

    let application_id = generate_application_id();

    sqlx::query(
        r#"
        INSERT INTO applications (
            id, job_id, applicant_id, recruiter_id, resume_id, resume_url,
            summary, cover_letter, status, applied_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, 'pending', datetime('now'), datetime('now'))
        "#,
    )
    .bind(&application_id)
    .bind(&job_id)
    .bind(&session.user_id)
    .bind(&recruiter_id)
    .bind(request.resume_id.as_deref())
    .bind(request.resume_url.as_deref())
    .bind(request.summary.as_deref())
    .bind(request.cover_letter.as_deref())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    sqlx::query("UPDATE jobs SET applicants = applicants + 1 WHERE id = ?")
        .bind(&job_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    // Notify the listing's recruiter
    sqlx::query(
        r#"
        INSERT INTO notifications (id, user_id, notif_type, body, read, created_at)
        VALUES (?, ?, 'application', ?, 0, datetime('now'))
        "#,
    )
    .bind(generate_notification_id())
    .bind(&recruiter_id)
    .bind(format!("New application received for job {}", job_id))
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %session.user_id,
        job_id = %job_id,
        application_id = %application_id,
        "Application submitted"
    );

    let application = sqlx::query_as::<_, Application>(&format!(
        "SELECT {} FROM applications WHERE id = ?",
        APPLICATION_COLUMNS
    ))
    .bind(&application_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(application))
}

/// GET /api/applications - The signed-in applicant's applications
pub async fn get_user_applications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let applications = sqlx::query_as::<_, Application>(&format!(
        "SELECT {} FROM applications WHERE applicant_id = ? ORDER BY applied_at DESC",
        APPLICATION_COLUMNS
    ))
    .bind(&session.user_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let total = applications.len();
    Ok(Json(ApplicationListResponse {
        applications,
        total,
    }))
}

/// GET /api/recruiter/jobs/:id/applications - Applicants for an owned listing
pub async fn list_job_applications(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Path(job_id): Path<String>,
) -> Result<Json<ApplicationListResponse>, ApiError> {
    session.require_role(Role::Recruiter)?;
    let state = state_lock.read().await.clone();

    let owner: Option<String> = sqlx::query_scalar("SELECT recruiter_id FROM jobs WHERE id = ?")
        .bind(&job_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
    let owner = owner.ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    if owner != session.user_id {
        return Err(ApiError::Forbidden(
            "You can only view applications for your own job listings".to_string(),
        ));
    }

    let applications = sqlx::query_as::<_, Application>(&format!(
        "SELECT {} FROM applications WHERE job_id = ? ORDER BY applied_at DESC",
        APPLICATION_COLUMNS
    ))
    .bind(&job_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let total = applications.len();
    Ok(Json(ApplicationListResponse {
        applications,
        total,
    }))
}
