//! Full dine-in cycle
//!
//! Walks one table through seat, order, kitchen, bill and payment, checking
//! the table status and the computed figures at every step.

mod common;

use common::spawn_app;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_full_dine_in_cycle() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let waiter = app.login("waiter1").await;
    let kitchen = app.login("kitchen1").await;
    let cashier = app.login("cashier1").await;

    let table_id = app.create_table(&manager, 3, 4).await;
    let item_id = app
        .create_menu_item(&manager, "Grilled Salmon", "150.00")
        .await;

    // Waiter opens an order; the table is seated
    let (status, order) = app
        .post("/api/orders", &waiter, json!({ "table_id": table_id }))
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["status"], "placed");
    let order_id = order["id"].as_i64().unwrap();

    let (_, table) = app.get(&format!("/api/tables/{table_id}"), &waiter).await;
    assert_eq!(table["status"], "occupied");

    // Two salmon
    let (status, detail) = app
        .post(
            &format!("/api/orders/{order_id}/add_item"),
            &waiter,
            json!({ "menu_item_id": item_id, "quantity": 2 }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{detail}");
    assert_eq!(detail["items"].as_array().unwrap().len(), 1);
    assert_eq!(detail["items"][0]["quantity"], 2);
    assert_eq!(detail["items"][0]["unit_price"], "150.00");

    // To the kitchen; kitchen staff are notified
    let (status, order) = app
        .post_empty(&format!("/api/orders/{order_id}/send_to_kitchen"), &waiter)
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["status"], "in_kitchen");

    let (_, counts) = app.get("/api/notifications/unread_count", &kitchen).await;
    assert_eq!(counts["unread"], 1);

    let (status, order) = app
        .post_empty(&format!("/api/orders/{order_id}/mark_served"), &kitchen)
        .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["status"], "served");

    // Waiters hear the order is ready
    let (_, counts) = app.get("/api/notifications/unread_count", &waiter).await;
    assert_eq!(counts["unread"], 1);

    // Cashier opens the bill shell, then generates the figures
    let (status, bill) = app
        .post("/api/bills", &cashier, json!({ "table_id": table_id }))
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["status"], "not_generated");
    let bill_id = bill["id"].as_i64().unwrap();

    let (status, bill) = app
        .post(
            &format!("/api/bills/{bill_id}/generate_bill"),
            &cashier,
            json!({ "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["status"], "pending");
    assert_eq!(bill["subtotal"], "300.00");
    assert_eq!(bill["tax_percentage"], "5.00");
    assert_eq!(bill["tax_amount"], "15.00");
    assert_eq!(bill["total_amount"], "315.00");
    assert_eq!(bill["order_id"].as_i64(), Some(order_id));

    // Generating the figures moves the table to awaiting payment
    let (_, table) = app.get(&format!("/api/tables/{table_id}"), &waiter).await;
    assert_eq!(table["status"], "bill_requested");

    // Settlement frees the table
    let (status, bill) = app
        .post_empty(&format!("/api/bills/{bill_id}/mark_as_paid"), &cashier)
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["status"], "paid");
    assert!(bill["paid_at"].as_i64().is_some());

    let (_, table) = app.get(&format!("/api/tables/{table_id}"), &waiter).await;
    assert_eq!(table["status"], "available");

    // Paid bill shows up in the daily sales report
    let (status, report) = app.get("/api/reports/daily-sales", &manager).await;
    assert_eq!(status, StatusCode::OK, "{report}");
    assert_eq!(report["bill_count"], 1);
    assert_eq!(report["total_revenue"], "315.00");
    assert_eq!(report["total_tax"], "15.00");
}

#[tokio::test]
async fn test_dashboard_tracks_active_order_and_bill() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;

    let table_id = app.create_table(&manager, 1, 2).await;
    let item_id = app.create_menu_item(&manager, "Lemonade", "4.50").await;

    let (_, order) = app
        .post("/api/orders", &manager, json!({ "table_id": table_id }))
        .await;
    let order_id = order["id"].as_i64().unwrap();
    app.post(
        &format!("/api/orders/{order_id}/add_item"),
        &manager,
        json!({ "menu_item_id": item_id, "quantity": 3 }),
    )
    .await;

    let (status, dashboard) = app.get("/api/tables/dashboard", &manager).await;
    assert_eq!(status, StatusCode::OK, "{dashboard}");
    let entry = dashboard
        .as_array()
        .unwrap()
        .iter()
        .find(|e| e["id"].as_i64() == Some(table_id))
        .expect("table missing from dashboard");
    assert_eq!(entry["status"], "occupied");
    assert_eq!(entry["order_id"].as_i64(), Some(order_id));
    assert_eq!(entry["order_status"], "placed");
    assert_eq!(entry["item_count"], 1);
    assert!(entry["bill_id"].is_null());
}
