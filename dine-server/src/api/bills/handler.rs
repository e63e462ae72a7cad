//! Bill API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::IntoResponse,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::models::{Bill, BillCreate, BillGenerate, BillStatus};
use crate::db::repository::{bill, order, table};
use crate::services::BillDocument;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<BillStatus>,
    pub table_id: Option<i64>,
}

/// GET /api/bills?status=pending&table_id=3
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Bill>>> {
    let bills = bill::find_all(&state.pool, query.status, query.table_id).await?;
    Ok(Json(bills))
}

/// GET /api/bills/pending_bills - cashier work queue
pub async fn pending_bills(State(state): State<ServerState>) -> AppResult<Json<Vec<Bill>>> {
    let bills = bill::find_pending(&state.pool).await?;
    Ok(Json(bills))
}

/// GET /api/bills/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    let found = bill::get(&state.pool, id).await?;
    Ok(Json(found))
}

/// POST /api/bills - open a bill shell on a seated table
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BillCreate>,
) -> AppResult<Json<Bill>> {
    payload.validate()?;
    let created = bill::create(&state.pool, payload).await?;
    Ok(Json(created))
}

/// POST /api/bills/{id}/generate_bill - compute figures from a served order
pub async fn generate_bill(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<BillGenerate>,
) -> AppResult<Json<Bill>> {
    payload.validate()?;
    let generated = bill::generate(&state.pool, id, payload).await?;

    if let Some(dining_table) = table::find_by_id(&state.pool, generated.table_id).await? {
        state
            .dispatcher
            .bill_pending(
                dining_table.table_number,
                dining_table.id,
                generated.id,
                &generated.total_amount.to_string(),
            )
            .await;
    }

    Ok(Json(generated))
}

/// POST /api/bills/{id}/mark_as_paid - settle and free the table
pub async fn mark_as_paid(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    let paid = bill::mark_as_paid(&state.pool, id).await?;

    if let Some(dining_table) = table::find_by_id(&state.pool, paid.table_id).await? {
        state
            .dispatcher
            .payment_received(
                dining_table.table_number,
                dining_table.id,
                paid.id,
                &paid.total_amount.to_string(),
            )
            .await;
    }

    Ok(Json(paid))
}

/// POST /api/bills/{id}/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Bill>> {
    let cancelled = bill::cancel(&state.pool, id).await?;
    Ok(Json(cancelled))
}

/// GET /api/bills/{id}/export_pdf - binary PDF via the external renderer
pub async fn export_pdf(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<impl IntoResponse> {
    let found = bill::get(&state.pool, id).await?;
    let order_id = found
        .order_id
        .ok_or_else(|| AppError::validation(format!("Bill {id} has no generated figures yet")))?;

    let dining_table = table::get(&state.pool, found.table_id).await?;
    let items = order::items(&state.pool, order_id).await?;

    let document = BillDocument {
        table_number: dining_table.table_number,
        bill: found,
        items,
    };
    let bytes = state.pdf.render_bill(&document).await?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    if let Ok(value) = HeaderValue::from_str(&format!("attachment; filename=\"bill_{id}.pdf\"")) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((headers, bytes))
}
