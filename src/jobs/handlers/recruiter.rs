// src/jobs/handlers/recruiter.rs
//! Recruiter-gated job management

use axum::{
    extract::{Extension, Path},
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::{Role, Session};
use crate::common::{generate_job_id, now_epoch_seconds, ApiError, AppState, Validator};
use crate::jobs::models::*;
use crate::jobs::validators::JobValidator;

const JOB_COLUMNS: &str = r#"
    id, recruiter_id, title, company, location, employment_type, experience_level,
    remote, salary_min, salary_max, salary_currency, salary_period, skills,
    visa_sponsorship, status, description, requirements, benefits, job_simulation,
    key_qualifications, views, applicants, created_at, updated_at
"#;

async fn load_owned_job(
    state: &AppState,
    job_id: &str,
    session: &Session,
) -> Result<Job, ApiError> {
    let row = sqlx::query_as::<_, JobRow>(&format!(
        "SELECT {} FROM jobs WHERE id = ?",
        JOB_COLUMNS
    ))
    .bind(job_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    if row.recruiter_id != session.user_id {
        warn!(
            job_id = %job_id,
            user_id = %session.user_id,
            "Rejected job mutation by non-owner"
        );
        return Err(ApiError::Forbidden(
            "You can only manage your own job listings".to_string(),
        ));
    }

    Ok(row.into())
}

/// POST /api/recruiter/jobs - Create a new job listing
pub async fn create_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(request): Json<CreateJob>,
) -> Result<Json<Job>, ApiError> {
    session.require_role(Role::Recruiter)?;
    let state = state_lock.read().await.clone();

    let validator = JobValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            user_id = %session.user_id,
            errors = ?validation_result.errors,
            "Job creation validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let job_id = generate_job_id();
    let salary = request.salary.unwrap_or_default();
    let skills_json = serde_json::to_string(&request.skills.unwrap_or_default())
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;
    let key_qualifications_json = request
        .key_qualifications
        .map(|q| serde_json::to_string(&q))
        .transpose()
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;
    let status = request.status.unwrap_or(JobStatus::Active);

    sqlx::query(
        r#"
        INSERT INTO jobs (
            id, recruiter_id, title, company, location, employment_type, experience_level,
            remote, salary_min, salary_max, salary_currency, salary_period, skills,
            visa_sponsorship, status, description, requirements, benefits, job_simulation,
            key_qualifications, views, applicants, created_at, updated_at
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, 0, 0, ?, datetime('now'))
        "#,
    )
    .bind(&job_id)
    .bind(&session.user_id)
    .bind(&request.title)
    .bind(request.company.as_deref())
    .bind(request.location.as_deref())
    .bind(request.employment_type.map(|t| t.as_str()))
    .bind(request.experience_level.map(|l| l.as_str()))
    .bind(request.remote.map(|r| r.as_str()))
    .bind(salary.min.as_deref())
    .bind(salary.max.as_deref())
    .bind(salary.currency.as_deref())
    .bind(salary.period.as_deref())
    .bind(&skills_json)
    .bind(request.visa_sponsorship.unwrap_or(false) as i64)
    .bind(status.as_str())
    .bind(request.description.as_deref())
    .bind(request.requirements.as_deref())
    .bind(request.benefits.as_deref())
    .bind(request.job_simulation.as_deref())
    .bind(key_qualifications_json.as_deref())
    .bind(now_epoch_seconds())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %session.user_id,
        job_id = %job_id,
        title = %request.title,
        "Job listing created"
    );

    let job = load_owned_job(&state, &job_id, &session).await?;
    Ok(Json(job))
}

/// GET /api/recruiter/jobs - List the recruiter's own listings (all statuses)
pub async fn list_own_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
) -> Result<Json<JobListResponse>, ApiError> {
    session.require_role(Role::Recruiter)?;
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, JobRow>(&format!(
        "SELECT {} FROM jobs WHERE recruiter_id = ? ORDER BY created_at DESC",
        JOB_COLUMNS
    ))
    .bind(&session.user_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let jobs: Vec<Job> = rows.into_iter().map(|r| r.into()).collect();
    let total = jobs.len();

    Ok(Json(JobListResponse { jobs, total }))
}

/// PUT /api/recruiter/jobs/:id - Update an owned job listing
pub async fn update_job(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Path(job_id): Path<String>,
    Json(request): Json<UpdateJob>,
) -> Result<Json<Job>, ApiError> {
    session.require_role(Role::Recruiter)?;
    let state = state_lock.read().await.clone();

    let validator = JobValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        return Err(ApiError::from(validation_result));
    }

    let existing = load_owned_job(&state, &job_id, &session).await?;

    let salary = request.salary.unwrap_or(existing.salary);
    let skills = request.skills.unwrap_or(existing.skills);
    let skills_json =
        serde_json::to_string(&skills).map_err(|e| ApiError::InternalServer(e.to_string()))?;
    let key_qualifications = request
        .key_qualifications
        .or(existing.key_qualifications);
    let key_qualifications_json = key_qualifications
        .map(|q| serde_json::to_string(&q))
        .transpose()
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;

    sqlx::query(
        r#"
        UPDATE jobs SET
            title = ?, company = ?, location = ?, employment_type = ?, experience_level = ?,
            remote = ?, salary_min = ?, salary_max = ?, salary_currency = ?, salary_period = ?,
            skills = ?, visa_sponsorship = ?, description = ?, requirements = ?, benefits = ?,
            job_simulation = ?, key_qualifications = ?, updated_at = datetime('now')
        WHERE id = ?
        "#,
    )
    .bind(request.title.as_deref().unwrap_or(&existing.title))
    .bind(request.company.or(existing.company).as_deref())
    .bind(request.location.or(existing.location).as_deref())
    .bind(
        request
            .employment_type
            .or(existing.employment_type)
            .map(|t| t.as_str()),
    )
    .bind(
        request
            .experience_level
            .or(existing.experience_level)
            .map(|l| l.as_str()),
    )
    .bind(request.remote.or(existing.remote).map(|r| r.as_str()))
    .bind(salary.min.as_deref())
    .bind(salary.max.as_deref())
    .bind(salary.currency.as_deref())
    .bind(salary.period.as_deref())
    .bind(&skills_json)
    .bind(request.visa_sponsorship.unwrap_or(existing.visa_sponsorship) as i64)
    .bind(request.description.or(existing.description).as_deref())
    .bind(request.requirements.or(existing.requirements).as_deref())
    .bind(request.benefits.or(existing.benefits).as_deref())
    .bind(request.job_simulation.or(existing.job_simulation).as_deref())
    .bind(key_qualifications_json.as_deref())
    .bind(&job_id)
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(user_id = %session.user_id, job_id = %job_id, "Job listing updated");

    let job = load_owned_job(&state, &job_id, &session).await?;
    Ok(Json(job))
}

/// PATCH /api/recruiter/jobs/:id/status - Toggle a listing between
/// active and inactive; listings are never deleted.
pub async fn update_job_status(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Path(job_id): Path<String>,
    Json(request): Json<UpdateJobStatusRequest>,
) -> Result<Json<Job>, ApiError> {
    session.require_role(Role::Recruiter)?;
    let state = state_lock.read().await.clone();

    load_owned_job(&state, &job_id, &session).await?;

    sqlx::query("UPDATE jobs SET status = ?, updated_at = datetime('now') WHERE id = ?")
        .bind(request.status.as_str())
        .bind(&job_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %session.user_id,
        job_id = %job_id,
        status = %request.status.as_str(),
        "Job status updated"
    );

    let job = load_owned_job(&state, &job_id, &session).await?;
    Ok(Json(job))
}
