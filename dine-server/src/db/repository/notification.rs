//! Notification Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Notification, NotificationType};
use crate::utils::time::now_millis;
use sqlx::SqlitePool;

const NOTIF_COLS: &str = "id, user_id, notification_type, title, message, table_id, order_id, bill_id, is_read, created_at, read_at";

/// Insert payload used by the dispatcher
#[derive(Debug, Clone)]
pub struct NotificationInsert {
    pub user_id: i64,
    pub notification_type: NotificationType,
    pub title: String,
    pub message: String,
    pub table_id: Option<i64>,
    pub order_id: Option<i64>,
    pub bill_id: Option<i64>,
}

pub async fn insert(pool: &SqlitePool, data: NotificationInsert) -> RepoResult<i64> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO notification (user_id, notification_type, title, message, table_id, order_id, bill_id, is_read, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, 0, ?) RETURNING id",
    )
    .bind(data.user_id)
    .bind(data.notification_type)
    .bind(&data.title)
    .bind(&data.message)
    .bind(data.table_id)
    .bind(data.order_id)
    .bind(data.bill_id)
    .bind(now_millis())
    .fetch_one(pool)
    .await?;
    Ok(id)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Notification>> {
    let notification = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {NOTIF_COLS} FROM notification WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(notification)
}

/// A user's notifications, newest first
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: i64,
    unread_only: bool,
    limit: i64,
) -> RepoResult<Vec<Notification>> {
    let notifications = sqlx::query_as::<_, Notification>(&format!(
        "SELECT {NOTIF_COLS} FROM notification WHERE user_id = ?1 AND (?2 = 0 OR is_read = 0) ORDER BY created_at DESC, id DESC LIMIT ?3"
    ))
    .bind(user_id)
    .bind(unread_only)
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(notifications)
}

pub async fn unread_count(pool: &SqlitePool, user_id: i64) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM notification WHERE user_id = ? AND is_read = 0",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(count)
}

/// Mark one of the user's notifications read; idempotent
pub async fn mark_as_read(pool: &SqlitePool, user_id: i64, id: i64) -> RepoResult<Notification> {
    // Only flips unread rows so read_at keeps its first value
    sqlx::query(
        "UPDATE notification SET is_read = 1, read_at = ? WHERE id = ? AND user_id = ? AND is_read = 0",
    )
    .bind(now_millis())
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    let notification = find_by_id(pool, id)
        .await?
        .filter(|n| n.user_id == user_id)
        .ok_or_else(|| RepoError::NotFound(format!("Notification {id} not found")))?;
    Ok(notification)
}

/// Hard-delete notifications created before `cutoff_millis`, read or not
pub async fn delete_older_than(pool: &SqlitePool, cutoff_millis: i64) -> RepoResult<u64> {
    let rows = sqlx::query("DELETE FROM notification WHERE created_at < ?")
        .bind(cutoff_millis)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected())
}
