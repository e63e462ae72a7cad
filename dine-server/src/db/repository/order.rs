//! Order Repository
//!
//! Order moves and their table side effects run in one transaction. The
//! partial unique index on active orders backstops the seat check, so two
//! racing creates on the same table cannot both land.

use super::{RepoError, RepoResult};
use crate::db::models::{
    DiningTable, MenuItem, Order, OrderAddItem, OrderCreate, OrderDetail, OrderItem, OrderStatus,
};
use crate::lifecycle::{self, LifecycleError, OrderAction, TableAction};
use crate::utils::time::now_millis;
use sqlx::{SqliteConnection, SqlitePool};

const ORDER_COLS: &str = "id, table_id, status, notes, created_at, updated_at";

async fn fetch_order(conn: &mut SqliteConnection, id: i64) -> RepoResult<Order> {
    sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

async fn fetch_table(conn: &mut SqliteConnection, id: i64) -> RepoResult<DiningTable> {
    sqlx::query_as::<_, DiningTable>(
        "SELECT id, table_number, seating_capacity, status, created_at, updated_at FROM dining_table WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(conn)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!("SELECT {ORDER_COLS} FROM orders WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(order)
}

pub async fn get(pool: &SqlitePool, id: i64) -> RepoResult<Order> {
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
}

pub async fn find_all(
    pool: &SqlitePool,
    status: Option<OrderStatus>,
    table_id: Option<i64>,
) -> RepoResult<Vec<Order>> {
    let orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLS} FROM orders WHERE (?1 IS NULL OR status = ?1) AND (?2 IS NULL OR table_id = ?2) ORDER BY created_at DESC"
    ))
    .bind(status)
    .bind(table_id)
    .fetch_all(pool)
    .await?;
    Ok(orders)
}

pub async fn items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let items = sqlx::query_as::<_, OrderItem>(
        "SELECT oi.id, oi.order_id, oi.menu_item_id, m.name AS menu_item_name, oi.quantity, oi.unit_price, oi.special_notes, oi.created_at FROM order_item oi JOIN menu_item m ON m.id = oi.menu_item_id WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn get_detail(pool: &SqlitePool, id: i64) -> RepoResult<OrderDetail> {
    let order = get(pool, id).await?;
    let items = items(pool, id).await?;
    Ok(OrderDetail { order, items })
}

/// Open an order on an available table; seats the table in the same transaction
pub async fn create(pool: &SqlitePool, data: OrderCreate) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    let table = fetch_table(&mut tx, data.table_id).await?;
    lifecycle::table::next(table.status, TableAction::SeatOrder).map_err(|_| {
        LifecycleError::TableUnavailable(format!(
            "Table {} is {} and cannot seat a new order",
            table.table_number, table.status
        ))
    })?;

    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE dining_table SET status = 'occupied', updated_at = ? WHERE id = ? AND status = 'available'",
    )
    .bind(now)
    .bind(table.id)
    .execute(&mut *tx)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Table {} was seated concurrently",
            table.table_number
        )));
    }

    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (table_id, status, notes, created_at, updated_at) VALUES (?, 'placed', ?, ?, ?) RETURNING id",
    )
    .bind(data.table_id)
    .bind(&data.notes)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Conflict(format!(
            "Table {} already has an active order",
            table.table_number
        )),
        other => other,
    })?;

    tx.commit().await?;
    get(pool, id).await
}

/// Guard that the order still accepts item changes
///
/// Implemented as a conditional touch of `updated_at` so the guard and the
/// item write race as one unit.
async fn lock_placed(conn: &mut SqliteConnection, order: &Order) -> RepoResult<()> {
    let rows = sqlx::query("UPDATE orders SET updated_at = ? WHERE id = ? AND status = 'placed'")
        .bind(now_millis())
        .bind(order.id)
        .execute(conn)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(LifecycleError::OrderLocked(format!(
            "Order {} is {}; items can no longer be changed",
            order.id, order.status
        ))
        .into());
    }
    Ok(())
}

/// Add a line to a placed order
///
/// Adding the same menu item again folds into the existing line: quantity
/// accumulates, the unit price captured on first addition is kept.
pub async fn add_item(pool: &SqlitePool, order_id: i64, data: OrderAddItem) -> RepoResult<OrderDetail> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;
    lock_placed(&mut tx, &order).await?;

    let menu_item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, category, price, description, is_available, created_at, updated_at FROM menu_item WHERE id = ?",
    )
    .bind(data.menu_item_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Menu item {} not found", data.menu_item_id)))?;

    if !menu_item.is_available {
        return Err(RepoError::Validation(format!(
            "Menu item '{}' is not available",
            menu_item.name
        )));
    }

    sqlx::query(
        "INSERT INTO order_item (order_id, menu_item_id, quantity, unit_price, special_notes, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6) ON CONFLICT(order_id, menu_item_id) DO UPDATE SET quantity = order_item.quantity + excluded.quantity, special_notes = excluded.special_notes",
    )
    .bind(order_id)
    .bind(data.menu_item_id)
    .bind(data.quantity)
    .bind(menu_item.price.as_db())
    .bind(&data.special_notes)
    .bind(now_millis())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    get_detail(pool, order_id).await
}

/// Remove a line from a placed order
pub async fn remove_item(pool: &SqlitePool, order_id: i64, item_id: i64) -> RepoResult<OrderDetail> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;
    lock_placed(&mut tx, &order).await?;

    let rows = sqlx::query("DELETE FROM order_item WHERE id = ? AND order_id = ?")
        .bind(item_id)
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!(
            "Item {item_id} not found on order {order_id}"
        )));
    }

    tx.commit().await?;
    get_detail(pool, order_id).await
}

async fn transition(
    conn: &mut SqliteConnection,
    order: &Order,
    action: OrderAction,
) -> RepoResult<OrderStatus> {
    let to = lifecycle::order::next(order.status, action)?;

    let rows = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now_millis())
        .bind(order.id)
        .bind(order.status)
        .execute(conn)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::Conflict(format!(
            "Order {} was modified concurrently",
            order.id
        )));
    }
    Ok(to)
}

/// Send a placed, non-empty order to the kitchen
pub async fn send_to_kitchen(pool: &SqlitePool, order_id: i64) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;

    let item_count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_item WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(&mut *tx)
            .await?;
    if item_count == 0 {
        return Err(RepoError::Validation(format!(
            "Order {order_id} has no items to send"
        )));
    }

    transition(&mut tx, &order, OrderAction::SendToKitchen).await?;

    tx.commit().await?;
    get(pool, order_id).await
}

/// Mark an in-kitchen order as served
pub async fn mark_served(pool: &SqlitePool, order_id: i64) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;
    transition(&mut tx, &order, OrderAction::MarkServed).await?;

    tx.commit().await?;
    get(pool, order_id).await
}

/// Cancel an order before it is served; frees the table
pub async fn cancel(pool: &SqlitePool, order_id: i64) -> RepoResult<Order> {
    let mut tx = pool.begin().await?;

    let order = fetch_order(&mut tx, order_id).await?;
    transition(&mut tx, &order, OrderAction::Cancel).await?;

    let now = now_millis();

    // Drop any bill shell opened for this seating
    sqlx::query(
        "UPDATE bill SET status = 'cancelled', updated_at = ? WHERE table_id = ? AND status = 'not_generated'",
    )
    .bind(now)
    .bind(order.table_id)
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        "UPDATE dining_table SET status = 'available', updated_at = ? WHERE id = ? AND status IN ('occupied', 'bill_requested')",
    )
    .bind(now)
    .bind(order.table_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    get(pool, order_id).await
}

/// Non-cancelled orders opened within the given time range, for daily reporting
pub async fn count_in_range(pool: &SqlitePool, start: i64, end: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM orders WHERE created_at >= ? AND created_at < ? AND status != 'cancelled'",
    )
    .bind(start)
    .bind(end)
    .fetch_one(pool)
    .await?;
    Ok(count)
}
