// src/notifications/handlers.rs
//! Notification count summaries

use axum::{
    extract::{Extension, Query},
    response::Json,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::auth::Session;
use crate::common::{ApiError, AppState};
use crate::notifications::models::{NotificationTypeCounts, NotificationTypesQuery};

/// GET /api/notifications/types?read= - Per-type counts for the signed-in
/// user, optionally filtered by read state.
pub async fn get_notification_type_counts(
    Extension(state_lock): Extension<Arc<RwLock<AppState>>>,
    session: Session,
    Query(query): Query<NotificationTypesQuery>,
) -> Result<Json<NotificationTypeCounts>, ApiError> {
    let state = state_lock.read().await.clone();

    let rows: Vec<(String, i64)> = match query.read {
        Some(read) => sqlx::query_as(
            "SELECT notif_type, COUNT(*) FROM notifications \
             WHERE user_id = ? AND read = ? GROUP BY notif_type",
        )
        .bind(&session.user_id)
        .bind(read as i64)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?,
        None => sqlx::query_as(
            "SELECT notif_type, COUNT(*) FROM notifications \
             WHERE user_id = ? GROUP BY notif_type",
        )
        .bind(&session.user_id)
        .fetch_all(&state.db)
        .await
        .map_err(ApiError::DatabaseError)?,
    };

    let mut type_counts = BTreeMap::new();
    let mut total = 0;
    for (notif_type, count) in rows {
        total += count;
        type_counts.insert(notif_type, count);
    }

    Ok(Json(NotificationTypeCounts { type_counts, total }))
}
