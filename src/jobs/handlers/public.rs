// src/jobs/handlers/public.rs

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, warn};

use crate::common::{generate_view_id, ApiError, AppState, Validator};
use crate::jobs::models::*;
use crate::jobs::search::{filter_and_sort, JobFilter, JobFilterParams};
use crate::jobs::validators::JobViewValidator;

/// GET /api/jobs - List active jobs through the filter/sort engine
///
/// The full active set is loaded and filtered in memory; the filter config
/// comes straight from the query string.
pub async fn list_jobs(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Query(params): Query<JobFilterParams>,
) -> Result<Json<JobListResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows = sqlx::query_as::<_, JobRow>(
        r#"SELECT
            id, recruiter_id, title, company, location, employment_type, experience_level,
            remote, salary_min, salary_max, salary_currency, salary_period, skills,
            visa_sponsorship, status, description, requirements, benefits, job_simulation,
            key_qualifications, views, applicants, created_at, updated_at
        FROM jobs
        WHERE status = 'active'"#,
    )
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let jobs: Vec<Job> = rows.into_iter().map(|r| r.into()).collect();
    let filter = JobFilter::from(params);
    let filtered = filter_and_sort(&jobs, &filter);

    debug!(
        fetched = jobs.len(),
        matched = filtered.len(),
        sort_by = ?filter.sort_by,
        "Served filtered job list"
    );

    let total = filtered.len();
    Ok(Json(JobListResponse {
        jobs: filtered,
        total,
    }))
}

/// GET /api/jobs/:id - Get a specific active job by ID (public endpoint)
pub async fn get_job_by_id(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, ApiError> {
    let state = state_lock.read().await.clone();

    let row = sqlx::query_as::<_, JobRow>(
        r#"SELECT
            id, recruiter_id, title, company, location, employment_type, experience_level,
            remote, salary_min, salary_max, salary_currency, salary_period, skills,
            visa_sponsorship, status, description, requirements, benefits, job_simulation,
            key_qualifications, views, applicants, created_at, updated_at
        FROM jobs
        WHERE id = ? AND status = 'active'"#,
    )
    .bind(&job_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?
    .ok_or_else(|| ApiError::NotFound(format!("Job not found: {}", job_id)))?;

    debug!(job_id = %job_id, "Served job details");

    Ok(Json(row.into()))
}

/// POST /api/jobs/:id/view - Track a job view and bump the counter
pub async fn track_job_view(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Path(job_id): Path<String>,
    Json(request): Json<JobViewRequest>,
) -> Result<StatusCode, ApiError> {
    let state = state_lock.read().await.clone();

    let validator = JobViewValidator;
    let validation_result = validator.validate(&request);
    if !validation_result.is_valid {
        warn!(
            job_id = %job_id,
            errors = ?validation_result.errors,
            "Job view tracking validation failed"
        );
        return Err(ApiError::from(validation_result));
    }

    let job_exists = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jobs WHERE id = ?")
        .bind(&job_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    if job_exists == 0 {
        warn!(job_id = %job_id, "Job view tracking failed: job not found");
        return Err(ApiError::NotFound("Job not found".to_string()));
    }

    let view_id = generate_view_id();
    sqlx::query(
        r#"
        INSERT INTO job_views (id, job_id, user_id, user_agent, referrer, viewed_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&view_id)
    .bind(&job_id)
    .bind(None::<String>) // views are tracked anonymously
    .bind(request.user_agent.as_deref())
    .bind(request.referrer.as_deref())
    .execute(&state.db)
    .await
    .map_err(|e| {
        error!(error = %e, job_id = %job_id, "Database error creating job view record");
        ApiError::DatabaseError(e)
    })?;

    sqlx::query("UPDATE jobs SET views = views + 1 WHERE id = ?")
        .bind(&job_id)
        .execute(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    debug!(job_id = %job_id, view_id = %view_id, "Job view tracked");

    Ok(StatusCode::CREATED)
}
