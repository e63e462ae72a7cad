//! Notification API Handlers

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::Notification;
use crate::db::repository::notification;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct UnreadCount {
    pub unread: i64,
}

/// GET /api/notifications?unread_only=true - own notifications, newest first
pub async fn list(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let limit = query.limit.unwrap_or(100).clamp(1, 500);
    let notifications =
        notification::find_for_user(&state.pool, user.id, query.unread_only, limit).await?;
    Ok(Json(notifications))
}

/// GET /api/notifications/unread_count
pub async fn unread_count(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<UnreadCount>> {
    let unread = notification::unread_count(&state.pool, user.id).await?;
    Ok(Json(UnreadCount { unread }))
}

/// POST /api/notifications/{id}/mark_as_read - idempotent
pub async fn mark_as_read(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<i64>,
) -> AppResult<Json<Notification>> {
    let updated = notification::mark_as_read(&state.pool, user.id, id).await?;
    Ok(Json(updated))
}
