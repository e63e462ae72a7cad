//! Bill Repository
//!
//! Figures are always recomputed from the order lines at generation time and
//! stored as a snapshot; later order edits never leak into a generated bill
//! unless it is regenerated while still pending.

use super::{RepoError, RepoResult};
use crate::billing::{self, BillLine};
use crate::db::models::{
    Bill, BillCreate, BillGenerate, BillStatus, DiningTable, Order, OrderStatus, TableStatus,
};
use crate::db::money::Money;
use crate::lifecycle::{self, BillAction, LifecycleError};
use crate::utils::time::now_millis;
use rust_decimal::Decimal;
use sqlx::{SqliteConnection, SqlitePool};

const BILL_COLS: &str = "id, table_id, order_id, subtotal, tax_percentage, tax_amount, total_amount, status, created_at, updated_at, paid_at";

fn validate_tax_percentage(rate: Money) -> RepoResult<()> {
    if rate.0 < Decimal::ZERO || rate.0 > Decimal::ONE_HUNDRED {
        return Err(RepoError::Validation(format!(
            "Tax percentage must be between 0 and 100, got {rate}"
        )));
    }
    Ok(())
}

async fn fetch_bill(conn: &mut SqliteConnection, id: i64) -> RepoResult<Bill> {
    sqlx::query_as::<_, Bill>(&format!("SELECT {BILL_COLS} FROM bill WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Bill {id} not found")))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Bill>> {
    let bill = sqlx::query_as::<_, Bill>(&format!("SELECT {BILL_COLS} FROM bill WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(bill)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Bill> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Bill {id} not found")))
}

pub async fn find_all(
    pool: &SqlitePool,
    status: Option<BillStatus>,
    table_id: Option<i64>,
) -> RepoResult<Vec<Bill>> {
    let bills = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLS} FROM bill WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR table_id = ?2) ORDER BY created_at DESC"
    ))
    .bind(status)
    .bind(table_id)
    .fetch_all(pool)
    .await?;
    Ok(bills)
}

pub async fn find_pending(pool: &SqlitePool) -> RepoResult<Vec<Bill>> {
    let bills = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLS} FROM bill WHERE status = 'pending' ORDER BY created_at"
    ))
    .fetch_all(pool)
    .await?;
    Ok(bills)
}

/// Pending bills whose figures were generated before `cutoff_millis`
pub async fn find_overdue_pending(pool: &SqlitePool, cutoff_millis: i64) -> RepoResult<Vec<Bill>> {
    let bills = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLS} FROM bill WHERE status = 'pending' AND updated_at < ? ORDER BY updated_at"
    ))
    .bind(cutoff_millis)
    .fetch_all(pool)
    .await?;
    Ok(bills)
}

/// Open a bill shell on a seated table; figures stay zero until generation
pub async fn create(pool: &SqlitePool, data: BillCreate) -> RepoResult<Bill> {
    let tax_percentage = data
        .tax_percentage
        .unwrap_or(Money(billing::DEFAULT_TAX_PERCENTAGE));
    validate_tax_percentage(tax_percentage)?;

    let mut tx = pool.begin().await?;

    let table = sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, seating_capacity, status, created_at, updated_at FROM dining_table WHERE id = ?",
    )
    .bind(data.table_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Table {} not found", data.table_id)))?;

    if matches!(table.status, TableStatus::Available | TableStatus::Closed) {
        return Err(LifecycleError::TableUnavailable(format!(
            "Table {} is {} and has no seating to bill",
            table.table_number, table.status
        ))
        .into());
    }

    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bill WHERE table_id = ? AND status IN ('not_generated', 'pending')",
    )
    .bind(data.table_id)
    .fetch_one(&mut *tx)
    .await?;
    if existing > 0 {
        return Err(LifecycleError::BillAlreadyExists(format!(
            "Table {} already has an active bill",
            table.table_number
        ))
        .into());
    }

    let now = now_millis();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO bill (table_id, subtotal, tax_percentage, tax_amount, total_amount, status, created_at, updated_at) VALUES (?, '0.00', ?, '0.00', '0.00', 'not_generated', ?, ?) RETURNING id",
    )
    .bind(data.table_id)
    .bind(tax_percentage.as_db())
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Lifecycle(LifecycleError::BillAlreadyExists(
            format!("Table {} already has an active bill", table.table_number),
        )),
        other => other,
    })?;

    tx.commit().await?;
    get(pool, id).await
}

/// Compute and store figures from a served order; bill moves to pending
///
/// Allowed again while still pending, which recomputes the snapshot.
pub async fn generate(pool: &SqlitePool, bill_id: i64, data: BillGenerate) -> RepoResult<Bill> {
    let mut tx = pool.begin().await?;

    let bill = fetch_bill(&mut tx, bill_id).await?;
    lifecycle::bill::next(bill.status, BillAction::Generate)?;

    let order = sqlx::query_as::<_, Order>(
        "SELECT id, table_id, status, notes, created_at, updated_at FROM orders WHERE id = ?",
    )
    .bind(data.order_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Order {} not found", data.order_id)))?;

    if order.table_id != bill.table_id {
        return Err(RepoError::Validation(format!(
            "Order {} belongs to a different table than bill {bill_id}",
            order.id
        )));
    }
    if order.status != OrderStatus::Served {
        return Err(LifecycleError::OrderNotServed(format!(
            "Order {} is {}; only served orders can be billed",
            order.id, order.status
        ))
        .into());
    }

    let claimed = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM bill WHERE order_id = ? AND status != 'cancelled' AND id != ?",
    )
    .bind(order.id)
    .bind(bill_id)
    .fetch_one(&mut *tx)
    .await?;
    if claimed > 0 {
        return Err(LifecycleError::BillAlreadyExists(format!(
            "Order {} already has a bill",
            order.id
        ))
        .into());
    }

    let lines = sqlx::query_as::<_, (String, i64)>(
        "SELECT unit_price, quantity FROM order_item WHERE order_id = ?",
    )
    .bind(order.id)
    .fetch_all(&mut *tx)
    .await?;
    if lines.is_empty() {
        return Err(RepoError::Validation(format!(
            "Order {} has no items to bill",
            order.id
        )));
    }

    let mut bill_lines = Vec::with_capacity(lines.len());
    for (unit_price, quantity) in lines {
        let price = Money::try_from(unit_price)
            .map_err(|e| RepoError::Database(format!("Corrupt unit price on order {}: {e}", order.id)))?;
        bill_lines.push(BillLine {
            unit_price: price.0,
            quantity,
        });
    }
    let figures = billing::compute(&bill_lines, bill.tax_percentage.0);

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE bill SET order_id = ?, subtotal = ?, tax_amount = ?, total_amount = ?, status = 'pending', updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(order.id)
    .bind(figures.subtotal.to_string())
    .bind(figures.tax_amount.to_string())
    .bind(figures.total_amount.to_string())
    .bind(now)
    .bind(bill_id)
    .bind(bill.status)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Bill {bill_id} was modified concurrently"
        )));
    }

    // Table moves to awaiting payment if the waiter never requested it
    sqlx::query(
        "UPDATE dining_table SET status = 'bill_requested', updated_at = ? WHERE id = ? AND status = 'occupied'",
    )
    .bind(now)
    .bind(bill.table_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    get(pool, bill_id).await
}

/// Settle a pending bill; frees the table in the same transaction
pub async fn mark_as_paid(pool: &SqlitePool, bill_id: i64) -> RepoResult<Bill> {
    let mut tx = pool.begin().await?;

    let bill = fetch_bill(&mut tx, bill_id).await?;
    lifecycle::bill::next(bill.status, BillAction::MarkPaid)?;

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE bill SET status = 'paid', paid_at = ?, updated_at = ? WHERE id = ? AND status = 'pending'",
    )
    .bind(now)
    .bind(now)
    .bind(bill_id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Bill {bill_id} was modified concurrently"
        )));
    }

    sqlx::query(
        "UPDATE dining_table SET status = 'available', updated_at = ? WHERE id = ? AND status IN ('bill_requested', 'occupied')",
    )
    .bind(now)
    .bind(bill.table_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    get(pool, bill_id).await
}

/// Void a bill that was never paid
///
/// A table left awaiting payment drops back to occupied so the seating can
/// continue or be re-billed.
pub async fn cancel(pool: &SqlitePool, bill_id: i64) -> RepoResult<Bill> {
    let mut tx = pool.begin().await?;

    let bill = fetch_bill(&mut tx, bill_id).await?;
    lifecycle::bill::next(bill.status, BillAction::Cancel)?;

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE bill SET status = 'cancelled', updated_at = ? WHERE id = ? AND status = ?",
    )
    .bind(now)
    .bind(bill_id)
    .bind(bill.status)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Bill {bill_id} was modified concurrently"
        )));
    }

    sqlx::query(
        "UPDATE dining_table SET status = 'occupied', updated_at = ? WHERE id = ? AND status = 'bill_requested'",
    )
    .bind(now)
    .bind(bill.table_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    get(pool, bill_id).await
}

/// Bills paid within [start, end), for daily reporting
pub async fn find_paid_in_range(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<Vec<Bill>> {
    let bills = sqlx::query_as::<_, Bill>(&format!(
        "SELECT {BILL_COLS} FROM bill WHERE status = 'paid' AND paid_at >= ? AND paid_at < ? ORDER BY paid_at"
    ))
    .bind(start)
    .bind(end)
    .fetch_all(pool)
    .await?;
    Ok(bills)
}
