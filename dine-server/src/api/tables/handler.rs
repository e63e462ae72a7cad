//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableDashboardEntry, TableStatus,
};
use crate::db::repository::table;
use crate::lifecycle::TableAction;
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<TableStatus>,
}

/// GET /api/tables
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = table::find_all(&state.pool, query.status).await?;
    Ok(Json(tables))
}

/// GET /api/tables/dashboard - every table with active order and bill
pub async fn dashboard(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<TableDashboardEntry>>> {
    let entries = table::dashboard(&state.pool).await?;
    Ok(Json(entries))
}

/// GET /api/tables/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let found = table::get(&state.pool, id).await?;
    Ok(Json(found))
}

/// POST /api/tables
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let created = table::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// PUT /api/tables/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let updated = table::update(&state.pool, id, payload).await?;
    Ok(Json(updated))
}

/// DELETE /api/tables/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    table::delete(&state.pool, id).await?;
    Ok(Json(true))
}

/// POST /api/tables/{id}/request_bill - guest asked for the bill
pub async fn request_bill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let updated = table::transition(&state.pool, id, TableAction::RequestBill).await?;
    Ok(Json(updated))
}

/// POST /api/tables/{id}/close - take the table out of service
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let updated = table::transition(&state.pool, id, TableAction::Close).await?;
    Ok(Json(updated))
}

/// POST /api/tables/{id}/reopen
pub async fn reopen(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<DiningTable>> {
    let updated = table::transition(&state.pool, id, TableAction::Reopen).await?;
    Ok(Json(updated))
}
