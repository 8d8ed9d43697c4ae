//! Authentication handlers

use axum::extract::{Extension, Json};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use super::extractors::Session;
use super::models::{Claims, GoogleIdTokenPayload, Role, User};
use crate::common::{generate_user_id, safe_email_log, ApiError, AppState};

/// POST /api/auth/google
///
/// Authenticates a user via a Google OAuth ID token verified against the
/// tokeninfo endpoint. First sign-in creates the user with the requested
/// role (default applicant); later sign-ins keep the stored role.
pub async fn google_auth(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    Json(payload): Json<GoogleIdTokenPayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    info!("Received Google auth request");
    let state = state_lock.read().await.clone();

    // Verify token with Google's tokeninfo endpoint
    // Docs: https://developers.google.com/identity/sign-in/web/backend-auth
    let tokeninfo_url = format!(
        "https://oauth2.googleapis.com/tokeninfo?id_token={}",
        payload.id_token
    );

    let resp = state.http.get(&tokeninfo_url).send().await;
    let body = match resp {
        Ok(r) => {
            let status = r.status();
            debug!(http_status = %status, "Received response from tokeninfo endpoint");

            if status.is_success() {
                r.json::<serde_json::Value>().await.map_err(|e| {
                    error!(error = %e, "Failed to parse tokeninfo JSON response");
                    ApiError::BadRequest("malformed id_token".to_string())
                })?
            } else {
                warn!(http_status = %status, "Tokeninfo endpoint rejected the id_token");
                return Err(match status.as_u16() {
                    401 => ApiError::Unauthorized("expired or invalid id_token".to_string()),
                    _ => ApiError::BadRequest("id_token validation failed".to_string()),
                });
            }
        }
        Err(e) => {
            error!(error = %e, "HTTP error contacting tokeninfo endpoint");
            return Err(ApiError::ServiceUnavailable(
                "token validation service unavailable".to_string(),
            ));
        }
    };

    let email = body
        .get("email")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("id_token missing email".to_string()))?;
    let provider_id = body
        .get("sub")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .ok_or_else(|| ApiError::BadRequest("id_token missing subject".to_string()))?;
    let name = body.get("name").and_then(|v| v.as_str()).map(str::to_string);
    let avatar = body
        .get("picture")
        .and_then(|v| v.as_str())
        .map(str::to_string);

    if body.get("email_verified").and_then(|v| v.as_str()) != Some("true") {
        warn!(email = %safe_email_log(&email), "Rejecting sign-in with unverified email");
        return Err(ApiError::Unauthorized("email not verified".to_string()));
    }

    // When a client id is configured, the token audience must match it
    if let Some(expected_aud) = &state.google_client_id {
        let aud = body.get("aud").and_then(|v| v.as_str()).unwrap_or_default();
        if aud != expected_aud {
            warn!("Rejecting id_token issued for a different client");
            return Err(ApiError::Unauthorized("token audience mismatch".to_string()));
        }
    }

    let existing: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&email)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?;

    let user = match existing {
        Some(user) => user,
        None => {
            let user_id = generate_user_id();
            let role = payload.role.unwrap_or(Role::Applicant);

            sqlx::query(
                r#"
                INSERT INTO users (id, email, name, avatar, role, provider, provider_id, created_at)
                VALUES (?, ?, ?, ?, ?, 'google', ?, datetime('now'))
                "#,
            )
            .bind(&user_id)
            .bind(&email)
            .bind(name.as_deref())
            .bind(avatar.as_deref())
            .bind(role.as_str())
            .bind(&provider_id)
            .execute(&state.db)
            .await
            .map_err(ApiError::DatabaseError)?;

            info!(
                user_id = %user_id,
                email = %safe_email_log(&email),
                role = %role.as_str(),
                "Created new user from Google sign-in"
            );

            sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
                .bind(&user_id)
                .fetch_one(&state.db)
                .await
                .map_err(ApiError::DatabaseError)?
        }
    };

    let expiry = Utc::now() + Duration::days(7);
    let claims = Claims {
        sub: user.id.clone(),
        role: user.role.clone(),
        exp: expiry.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(state.jwt_secret.as_bytes()),
    )
    .map_err(|e| {
        error!(error = %e, "Failed to sign session token");
        ApiError::InternalServer("failed to issue session token".to_string())
    })?;

    debug!(user_id = %user.id, "Issued session token");

    Ok(Json(serde_json::json!({
        "token": token,
        "user": user,
    })))
}

/// GET /api/auth/me - return the authenticated user
pub async fn me(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
) -> Result<Json<User>, ApiError> {
    let state = state_lock.read().await.clone();

    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(&session.user_id)
        .fetch_optional(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(user))
}
