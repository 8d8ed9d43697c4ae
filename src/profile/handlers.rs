// src/profile/handlers.rs
//! Profile and saved-resume endpoints

use axum::{
    extract::Extension,
    response::Json,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::auth::Session;
use crate::candidates::enhancement::EnhancementSession;
use crate::common::{generate_resume_id, has_prefix, ApiError, AppState, EntityPrefix};
use crate::profile::models::*;

const RESUME_COLUMNS: &str =
    "id, user_id, label, data, source_resume_id, tailored_job_id, created_at";

/// GET /api/profile - Fetch the signed-in user's profile
pub async fn get_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
) -> Result<Json<Profile>, ApiError> {
    let state = state_lock.read().await.clone();

    let profile = sqlx::query_as::<_, Profile>(
        "SELECT user_id, headline, phone, location, bio, updated_at FROM profiles WHERE user_id = ?",
    )
    .bind(&session.user_id)
    .fetch_optional(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    // First read returns an empty profile rather than 404
    let profile = profile.unwrap_or(Profile {
        user_id: session.user_id.clone(),
        headline: None,
        phone: None,
        location: None,
        bio: None,
        updated_at: None,
    });

    Ok(Json(profile))
}

/// PUT /api/profile - Upsert the signed-in user's profile
pub async fn update_profile(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<Profile>, ApiError> {
    let state = state_lock.read().await.clone();

    sqlx::query(
        r#"
        INSERT INTO profiles (user_id, headline, phone, location, bio, updated_at)
        VALUES (?, ?, ?, ?, ?, datetime('now'))
        ON CONFLICT(user_id) DO UPDATE SET
            headline = excluded.headline,
            phone = excluded.phone,
            location = excluded.location,
            bio = excluded.bio,
            updated_at = datetime('now')
        "#,
    )
    .bind(&session.user_id)
    .bind(request.headline.as_deref())
    .bind(request.phone.as_deref())
    .bind(request.location.as_deref())
    .bind(request.bio.as_deref())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(user_id = %session.user_id, "Profile updated");

    let profile = sqlx::query_as::<_, Profile>(
        "SELECT user_id, headline, phone, location, bio, updated_at FROM profiles WHERE user_id = ?",
    )
    .bind(&session.user_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    Ok(Json(profile))
}

/// GET /api/profile/resumes - List the signed-in user's saved resumes,
/// newest first
pub async fn list_resumes(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
) -> Result<Json<Vec<ResumeResponse>>, ApiError> {
    let state = state_lock.read().await.clone();

    let records = sqlx::query_as::<_, ResumeRecord>(&format!(
        "SELECT {} FROM resumes WHERE user_id = ? ORDER BY created_at DESC, id DESC",
        RESUME_COLUMNS
    ))
    .bind(&session.user_id)
    .fetch_all(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let mut resumes = Vec::with_capacity(records.len());
    for record in records {
        let id = record.id.clone();
        match ResumeResponse::try_from(record) {
            Ok(response) => resumes.push(response),
            Err(e) => {
                // A corrupt row should not hide the rest of the list
                warn!(resume_id = %id, error = %e, "Skipping unreadable resume row");
            }
        }
    }

    Ok(Json(resumes))
}

/// POST /api/profile/resumes - Append a resume to the profile
///
/// Saving never replaces an existing resume; every save produces a new
/// row so original and enhanced versions coexist.
pub async fn save_resume(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Json(request): Json<SaveResumeRequest>,
) -> Result<Json<ResumeResponse>, ApiError> {
    let state = state_lock.read().await.clone();

    if let Some(source_id) = &request.source_resume_id {
        if !has_prefix(source_id, EntityPrefix::Resume) {
            return Err(ApiError::BadRequest(format!(
                "Invalid source resume id: {}",
                source_id
            )));
        }
        let owned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM resumes WHERE id = ? AND user_id = ?",
        )
        .bind(source_id)
        .bind(&session.user_id)
        .fetch_one(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;
        if owned == 0 {
            return Err(ApiError::NotFound(format!(
                "Source resume not found: {}",
                source_id
            )));
        }
    }

    if let Some(job_id) = &request.tailored_job_id {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs WHERE id = ?")
            .bind(job_id)
            .fetch_one(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;
        if exists == 0 {
            return Err(ApiError::NotFound(format!("Job not found: {}", job_id)));
        }
    }

    // An enhanced variant completes its enhancement workflow here: the
    // insert below is the one durable append, valid only as the
    // Enhanced -> Saved step.
    if request.source_resume_id.is_some() {
        let mut enhancement = EnhancementSession::enhanced();
        enhancement
            .save()
            .map_err(|e| ApiError::InternalServer(e.to_string()))?;
    }

    let resume_id = generate_resume_id();
    let data = serde_json::to_string(&request.resume)
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO resumes (id, user_id, label, data, source_resume_id, tailored_job_id, created_at)
        VALUES (?, ?, ?, ?, ?, ?, datetime('now'))
        "#,
    )
    .bind(&resume_id)
    .bind(&session.user_id)
    .bind(request.label.as_deref())
    .bind(&data)
    .bind(request.source_resume_id.as_deref())
    .bind(request.tailored_job_id.as_deref())
    .execute(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    info!(
        user_id = %session.user_id,
        resume_id = %resume_id,
        enhanced = request.source_resume_id.is_some(),
        "Resume saved to profile"
    );

    let record = sqlx::query_as::<_, ResumeRecord>(&format!(
        "SELECT {} FROM resumes WHERE id = ?",
        RESUME_COLUMNS
    ))
    .bind(&resume_id)
    .fetch_one(&state.db)
    .await
    .map_err(ApiError::DatabaseError)?;

    let response = ResumeResponse::try_from(record)
        .map_err(|e| ApiError::InternalServer(e.to_string()))?;
    Ok(Json(response))
}
