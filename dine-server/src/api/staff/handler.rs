//! Staff API Handlers

use axum::{Json, extract::State};
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate};
use crate::db::repository::staff;
use crate::utils::AppResult;

/// GET /api/staff
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Staff>>> {
    let all = staff::find_all(&state.pool).await?;
    Ok(Json(all))
}

/// POST /api/staff - password is argon2-hashed before storage
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<Json<Staff>> {
    payload.validate()?;
    let created = staff::create(&state.pool, payload).await?;
    Ok(Json(created))
}
