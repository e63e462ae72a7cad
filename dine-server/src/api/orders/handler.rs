//! Order API Handlers
//!
//! Notifications fire after the repository transaction commits; a dispatch
//! failure never undoes the transition it reports.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Order, OrderAddItem, OrderCreate, OrderDetail, OrderStatus};
use crate::db::repository::{order, table};
use crate::utils::AppResult;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<OrderStatus>,
    pub table_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RemoveItemQuery {
    pub item_id: i64,
}

/// GET /api/orders?status=placed&table_id=3
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(&state.pool, query.status, query.table_id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/{id} - order with its lines
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::get_detail(&state.pool, id).await?;
    Ok(Json(detail))
}

/// POST /api/orders - open an order and seat the table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    payload.validate()?;
    let created = order::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// POST /api/orders/{id}/add_item
pub async fn add_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderAddItem>,
) -> AppResult<Json<OrderDetail>> {
    payload.validate()?;
    let detail = order::add_item(&state.pool, id, payload).await?;
    Ok(Json(detail))
}

/// DELETE /api/orders/{id}/remove_item?item_id=7
pub async fn remove_item(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Query(query): Query<RemoveItemQuery>,
) -> AppResult<Json<OrderDetail>> {
    let detail = order::remove_item(&state.pool, id, query.item_id).await?;
    Ok(Json(detail))
}

/// POST /api/orders/{id}/send_to_kitchen
pub async fn send_to_kitchen(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let updated = order::send_to_kitchen(&state.pool, id).await?;

    if let Some(dining_table) = table::find_by_id(&state.pool, updated.table_id).await? {
        state
            .dispatcher
            .order_placed(dining_table.table_number, dining_table.id, updated.id)
            .await;
    }

    Ok(Json(updated))
}

/// POST /api/orders/{id}/mark_served
pub async fn mark_served(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let updated = order::mark_served(&state.pool, id).await?;

    if let Some(dining_table) = table::find_by_id(&state.pool, updated.table_id).await? {
        state
            .dispatcher
            .order_ready(dining_table.table_number, dining_table.id, updated.id)
            .await;
    }

    Ok(Json(updated))
}

/// POST /api/orders/{id}/cancel - frees the table
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let updated = order::cancel(&state.pool, id).await?;
    Ok(Json(updated))
}
