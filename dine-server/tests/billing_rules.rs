//! Billing rules
//!
//! One active bill per table, figures only from served orders, settlement
//! is final, and cancelling a bill hands the table back to the waiter.

mod common;

use common::{TestApp, spawn_app};
use http::StatusCode;
use serde_json::json;

/// Table with a served order holding `quantity` units at `price`
async fn served_order(app: &TestApp, manager: &str, price: &str, quantity: i64) -> (i64, i64) {
    let table_id = app.create_table(manager, 11, 2).await;
    let item_id = app.create_menu_item(manager, "House Special", price).await;

    let (_, order) = app
        .post("/api/orders", manager, json!({ "table_id": table_id }))
        .await;
    let order_id = order["id"].as_i64().unwrap();
    app.post(
        &format!("/api/orders/{order_id}/add_item"),
        manager,
        json!({ "menu_item_id": item_id, "quantity": quantity }),
    )
    .await;
    app.post_empty(&format!("/api/orders/{order_id}/send_to_kitchen"), manager)
        .await;
    app.post_empty(&format!("/api/orders/{order_id}/mark_served"), manager)
        .await;

    (table_id, order_id)
}

async fn open_bill(app: &TestApp, token: &str, table_id: i64) -> i64 {
    let (status, bill) = app
        .post("/api/bills", token, json!({ "table_id": table_id }))
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    bill["id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_no_bill_on_empty_table() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let table_id = app.create_table(&manager, 2, 4).await;

    let (status, body) = app
        .post("/api/bills", &cashier, json!({ "table_id": table_id }))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], "E7001");
}

#[tokio::test]
async fn test_one_active_bill_per_table() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let (table_id, _) = served_order(&app, &manager, "20.00", 1).await;

    open_bill(&app, &cashier, table_id).await;

    let (status, body) = app
        .post("/api/bills", &cashier, json!({ "table_id": table_id }))
        .await;
    assert_eq!(status, StatusCode::CONFLICT, "{body}");
    assert_eq!(body["code"], "E5002");
}

#[tokio::test]
async fn test_generate_requires_served_order() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;

    let table_id = app.create_table(&manager, 5, 4).await;
    let item_id = app.create_menu_item(&manager, "Soup", "6.00").await;
    let (_, order) = app
        .post("/api/orders", &manager, json!({ "table_id": table_id }))
        .await;
    let order_id = order["id"].as_i64().unwrap();
    app.post(
        &format!("/api/orders/{order_id}/add_item"),
        &manager,
        json!({ "menu_item_id": item_id, "quantity": 1 }),
    )
    .await;

    let bill_id = open_bill(&app, &cashier, table_id).await;

    // Still placed
    let (status, body) = app
        .post(
            &format!("/api/bills/{bill_id}/generate_bill"),
            &cashier,
            json!({ "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], "E5001");
}

#[tokio::test]
async fn test_custom_tax_rate_and_regenerate() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let (table_id, order_id) = served_order(&app, &manager, "100.00", 1).await;

    let (status, bill) = app
        .post(
            "/api/bills",
            &cashier,
            json!({ "table_id": table_id, "tax_percentage": "10.00" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    let bill_id = bill["id"].as_i64().unwrap();

    let (status, bill) = app
        .post(
            &format!("/api/bills/{bill_id}/generate_bill"),
            &cashier,
            json!({ "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["tax_amount"], "10.00");
    assert_eq!(bill["total_amount"], "110.00");

    // Regenerating a pending bill recomputes instead of failing
    let (status, bill) = app
        .post(
            &format!("/api/bills/{bill_id}/generate_bill"),
            &cashier,
            json!({ "order_id": order_id }),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["total_amount"], "110.00");
}

#[tokio::test]
async fn test_settlement_is_final() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let (table_id, order_id) = served_order(&app, &manager, "30.00", 2).await;

    let bill_id = open_bill(&app, &cashier, table_id).await;
    app.post(
        &format!("/api/bills/{bill_id}/generate_bill"),
        &cashier,
        json!({ "order_id": order_id }),
    )
    .await;

    let (status, bill) = app
        .post_empty(&format!("/api/bills/{bill_id}/mark_as_paid"), &cashier)
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");

    let (status, body) = app
        .post_empty(&format!("/api/bills/{bill_id}/mark_as_paid"), &cashier)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], "E4001");

    let (status, body) = app
        .post_empty(&format!("/api/bills/{bill_id}/cancel"), &cashier)
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{body}");
    assert_eq!(body["code"], "E4001");
}

#[tokio::test]
async fn test_cancel_pending_bill_reopens_table() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let (table_id, order_id) = served_order(&app, &manager, "18.00", 1).await;

    let bill_id = open_bill(&app, &cashier, table_id).await;
    app.post(
        &format!("/api/bills/{bill_id}/generate_bill"),
        &cashier,
        json!({ "order_id": order_id }),
    )
    .await;

    let (_, table) = app.get(&format!("/api/tables/{table_id}"), &cashier).await;
    assert_eq!(table["status"], "bill_requested");

    let (status, bill) = app
        .post_empty(&format!("/api/bills/{bill_id}/cancel"), &cashier)
        .await;
    assert_eq!(status, StatusCode::OK, "{bill}");
    assert_eq!(bill["status"], "cancelled");

    // The table goes back to occupied so a corrected bill can be issued
    let (_, table) = app.get(&format!("/api/tables/{table_id}"), &cashier).await;
    assert_eq!(table["status"], "occupied");

    let second = open_bill(&app, &cashier, table_id).await;
    assert_ne!(second, bill_id);
}

#[tokio::test]
async fn test_pending_queue_and_rounding() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    // 10.10 * 5% = 0.505, rounds half-up to 0.51
    let (table_id, order_id) = served_order(&app, &manager, "10.10", 1).await;

    let bill_id = open_bill(&app, &cashier, table_id).await;
    let (_, bill) = app
        .post(
            &format!("/api/bills/{bill_id}/generate_bill"),
            &cashier,
            json!({ "order_id": order_id }),
        )
        .await;
    assert_eq!(bill["tax_amount"], "0.51");
    assert_eq!(bill["total_amount"], "10.61");

    let (status, pending) = app.get("/api/bills/pending_bills", &cashier).await;
    assert_eq!(status, StatusCode::OK, "{pending}");
    let pending = pending.as_array().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["id"].as_i64(), Some(bill_id));

    app.post_empty(&format!("/api/bills/{bill_id}/mark_as_paid"), &cashier)
        .await;
    let (_, pending) = app.get("/api/bills/pending_bills", &cashier).await;
    assert!(pending.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_pdf_export_unavailable_without_renderer() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;
    let cashier = app.login("cashier1").await;
    let (table_id, order_id) = served_order(&app, &manager, "25.00", 1).await;

    let bill_id = open_bill(&app, &cashier, table_id).await;
    app.post(
        &format!("/api/bills/{bill_id}/generate_bill"),
        &cashier,
        json!({ "order_id": order_id }),
    )
    .await;

    // No PDF_RENDERER_URL configured in tests
    let (status, body) = app
        .get(&format!("/api/bills/{bill_id}/export_pdf"), &cashier)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST, "{body}");
    assert_eq!(body["code"], "E0002");
}

#[tokio::test]
async fn test_empty_day_report_keeps_two_places() {
    let app = spawn_app().await;
    let manager = app.login("boss").await;

    // A day with no paid bills still reads "0.00", never "0"
    let (status, report) = app
        .get("/api/reports/daily-sales?date=2000-01-01", &manager)
        .await;
    assert_eq!(status, StatusCode::OK, "{report}");
    assert_eq!(report["bill_count"], 0);
    assert_eq!(report["total_revenue"], "0.00");
    assert_eq!(report["total_tax"], "0.00");
    assert_eq!(report["average_bill"], "0.00");
}
