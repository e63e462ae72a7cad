//! Notification delivery, read tracking and retention sweep

mod common;

use common::spawn_app;
use dine_server::db::models::NotificationType;
use dine_server::db::repository::notification::{self, NotificationInsert};
use dine_server::db::repository::{staff, token};
use dine_server::notify;
use http::StatusCode;
use serde_json::json;

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

async fn staff_id(pool: &sqlx::SqlitePool, username: &str) -> i64 {
    staff::find_by_username(pool, username)
        .await
        .unwrap()
        .expect("seeded staff missing")
        .id
}

async fn insert_aged(pool: &sqlx::SqlitePool, user_id: i64, age_days: i64, is_read: bool) -> i64 {
    let id = notification::insert(
        pool,
        NotificationInsert {
            user_id,
            notification_type: NotificationType::TableAlert,
            title: "aged".into(),
            message: format!("{age_days} days old"),
            table_id: None,
            order_id: None,
            bill_id: None,
        },
    )
    .await
    .unwrap();

    sqlx::query("UPDATE notification SET created_at = ?, is_read = ? WHERE id = ?")
        .bind(now_millis() - age_days * DAY_MILLIS)
        .bind(is_read)
        .bind(id)
        .execute(pool)
        .await
        .unwrap();
    id
}

#[tokio::test]
async fn test_sweep_removes_expired_notifications() {
    let app = spawn_app().await;
    let pool = &app.state.pool;
    let manager_id = staff_id(pool, "boss").await;

    // Read state does not matter, only age does
    insert_aged(pool, manager_id, 31, false).await;
    insert_aged(pool, manager_id, 45, true).await;
    let recent = insert_aged(pool, manager_id, 29, false).await;

    let (removed_notifications, _) = notify::sweep(pool, 30).await;
    assert_eq!(removed_notifications, 2);

    let remaining = notification::find_for_user(pool, manager_id, false, 100)
        .await
        .unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, recent);

    // Second run finds nothing
    let (removed_notifications, _) = notify::sweep(pool, 30).await;
    assert_eq!(removed_notifications, 0);
}

#[tokio::test]
async fn test_sweep_drops_expired_token_revocations() {
    let app = spawn_app().await;
    let pool = &app.state.pool;

    token::revoke(pool, "long-gone-token", now_millis() - 1000)
        .await
        .unwrap();
    token::revoke(pool, "still-valid-token", now_millis() + DAY_MILLIS)
        .await
        .unwrap();

    let (_, removed_tokens) = notify::sweep(pool, 30).await;
    assert_eq!(removed_tokens, 1);

    assert!(!token::is_revoked(pool, "long-gone-token").await.unwrap());
    assert!(token::is_revoked(pool, "still-valid-token").await.unwrap());
}

#[tokio::test]
async fn test_notifications_are_user_scoped() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let pool = &app.state.pool;

    // A table alert goes to managers only
    app.state.dispatcher.table_alert(9, 1, "spill on 9".into()).await;

    let (_, manager_list) = app.get("/api/notifications", &manager).await;
    assert_eq!(manager_list.as_array().unwrap().len(), 1);
    let notification_id = manager_list[0]["id"].as_i64().unwrap();

    let (_, cashier_list) = app.get("/api/notifications", &cashier).await;
    assert!(cashier_list.as_array().unwrap().is_empty());

    // Another user cannot read someone else's notification
    let (status, body) = app
        .post_empty(
            &format!("/api/notifications/{notification_id}/mark_as_read"),
            &cashier,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND, "{body}");

    let manager_id = staff_id(pool, "boss").await;
    assert_eq!(notification::unread_count(pool, manager_id).await.unwrap(), 1);
}

#[tokio::test]
async fn test_mark_as_read_is_idempotent() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;

    app.state.dispatcher.table_alert(4, 1, "check table 4".into()).await;

    let (_, list) = app.get("/api/notifications?unread_only=true", &manager).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    let notification_id = list[0]["id"].as_i64().unwrap();

    let (status, first) = app
        .post_empty(&format!("/api/notifications/{notification_id}/mark_as_read"), &manager)
        .await;
    assert_eq!(status, StatusCode::OK, "{first}");
    assert_eq!(first["is_read"], true);
    let read_at = first["read_at"].as_i64().expect("read_at not set");

    // Marking again keeps the original read timestamp
    let (status, second) = app
        .post_empty(&format!("/api/notifications/{notification_id}/mark_as_read"), &manager)
        .await;
    assert_eq!(status, StatusCode::OK, "{second}");
    assert_eq!(second["read_at"].as_i64(), Some(read_at));

    let (_, counts) = app.get("/api/notifications/unread_count", &manager).await;
    assert_eq!(counts["unread"], 0);

    let (_, unread) = app.get("/api/notifications?unread_only=true", &manager).await;
    assert!(unread.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_dispatch_fans_out_per_role() {
    let app = spawn_app().await;
    let pool = &app.state.pool;

    // Kitchen and manager hear about new orders
    let delivered = app.state.dispatcher.order_placed(6, 1, 1).await;
    assert_eq!(delivered, 2);

    let kitchen_id = staff_id(pool, "kitchen1").await;
    let waiter_id = staff_id(pool, "waiter1").await;
    assert_eq!(notification::unread_count(pool, kitchen_id).await.unwrap(), 1);
    assert_eq!(notification::unread_count(pool, waiter_id).await.unwrap(), 0);

    // Inactive staff are skipped
    sqlx::query("UPDATE staff SET is_active = 0 WHERE username = 'kitchen1'")
        .execute(pool)
        .await
        .unwrap();
    let delivered = app.state.dispatcher.order_placed(6, 1, 2).await;
    assert_eq!(delivered, 1);
}
