//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::models::{
    DiningTable, DiningTableCreate, DiningTableUpdate, TableDashboardEntry, TableStatus,
};
use crate::lifecycle::{self, TableAction};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<DiningTable>> {
    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, seating_capacity, status, created_at, updated_at FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(table)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<DiningTable> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn find_all(pool: &SqlitePool, status: Option<TableStatus>) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, seating_capacity, status, created_at, updated_at FROM dining_table WHERE (?1 IS NULL OR status = ?1) ORDER BY table_number",
    )
    .bind(status)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}

pub async fn create(pool: &SqlitePool, data: DiningTableCreate) -> RepoResult<DiningTable> {
    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO dining_table (table_number, seating_capacity, status, created_at, updated_at) VALUES (?, ?, 'available', ?, ?) RETURNING id",
    )
    .bind(data.table_number)
    .bind(data.seating_capacity)
    .bind(now)
    .bind(now)
    .fetch_one(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("Table number {} already exists", data.table_number))
        }
        other => other,
    })?;

    get(pool, id).await
}

pub async fn update(pool: &SqlitePool, id: i64, data: DiningTableUpdate) -> RepoResult<DiningTable> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE dining_table SET table_number = COALESCE(?1, table_number), seating_capacity = COALESCE(?2, seating_capacity), updated_at = ?3 WHERE id = ?4",
    )
    .bind(data.table_number)
    .bind(data.seating_capacity)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Duplicate("Table number already exists".into()),
        other => other,
    })?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Table {id} not found")));
    }
    get(pool, id).await
}

/// Delete a table; refused while it is seated or awaiting payment
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let table = get(pool, id).await?;

    let rows = sqlx::query(
        "DELETE FROM dining_table WHERE id = ? AND status IN ('available', 'closed')",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Table {} is {} and cannot be deleted",
            table.table_number, table.status
        )));
    }
    Ok(())
}

/// Apply a lifecycle action to the table
///
/// The expected prior status goes into the WHERE clause, so a concurrent
/// writer invalidates this update instead of being overwritten.
pub async fn transition(pool: &SqlitePool, id: i64, action: TableAction) -> RepoResult<DiningTable> {
    let table = get(pool, id).await?;
    let to = lifecycle::table::next(table.status, action)?;

    let rows = sqlx::query(
        "UPDATE dining_table SET status = ?, updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(to)
    .bind(now_millis())
    .bind(id)
    .bind(table.status)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Table {} was modified concurrently",
            table.table_number
        )));
    }
    get(pool, id).await
}

/// Floor dashboard: every table with its active order and active bill
pub async fn dashboard(pool: &SqlitePool) -> RepoResult<Vec<TableDashboardEntry>> {
    let entries = sqlx::query_as::<_, TableDashboardEntry>(
        r#"
        SELECT
            t.id, t.table_number, t.seating_capacity, t.status,
            o.id AS order_id, o.status AS order_status,
            (SELECT COUNT(*) FROM order_item oi WHERE oi.order_id = o.id) AS item_count,
            b.id AS bill_id, b.status AS bill_status
        FROM dining_table t
        LEFT JOIN orders o ON o.table_id = t.id AND o.status IN ('placed', 'in_kitchen', 'served')
        LEFT JOIN bill b ON b.table_id = t.id AND b.status IN ('not_generated', 'pending')
        ORDER BY t.table_number
        "#,
    )
    .fetch_all(pool)
    .await?;
    Ok(entries)
}

/// Tables stuck awaiting payment since before `cutoff_millis`
pub async fn find_stale_bill_requested(
    pool: &SqlitePool,
    cutoff_millis: i64,
) -> RepoResult<Vec<DiningTable>> {
    let tables = sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, seating_capacity, status, created_at, updated_at FROM dining_table WHERE status = 'bill_requested' AND updated_at < ? ORDER BY updated_at",
    )
    .bind(cutoff_millis)
    .fetch_all(pool)
    .await?;
    Ok(tables)
}
