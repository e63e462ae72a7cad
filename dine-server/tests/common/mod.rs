//! Shared test harness
//!
//! Builds the full router over a temporary SQLite database and drives it
//! in-memory through tower's oneshot, no sockets involved.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use dine_server::auth::JwtConfig;
use dine_server::core::{Config, ServerState, build_router};
use dine_server::db::DbService;
use dine_server::db::models::{StaffCreate, StaffRole};
use dine_server::db::repository::staff;
use http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "password123";

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
    _tmp: tempfile::TempDir,
}

fn test_config(database_path: String, work_dir: String) -> Config {
    Config {
        work_dir,
        http_port: 0,
        database_path,
        jwt: JwtConfig {
            secret: "integration-test-secret-0123456789abcdef".to_string(),
            expiration_minutes: 60,
            issuer: "dine-server".to_string(),
            audience: "dine-clients".to_string(),
        },
        environment: "test".to_string(),
        sweep_interval_secs: 3600,
        notification_retention_days: 30,
        pending_bill_alert_secs: 7200,
        pdf_renderer_url: None,
        log_dir: None,
    }
}

/// Fresh app with one staff account per role
pub async fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = tmp.path().join("test.db");
    let db_path = db_path.to_str().expect("Invalid temp path").to_string();
    let work_dir = tmp.path().to_str().expect("Invalid temp path").to_string();

    let db = DbService::new(&db_path)
        .await
        .expect("Failed to open test database");

    for (username, role) in [
        ("waiter1", StaffRole::Waiter),
        ("cashier1", StaffRole::Cashier),
        ("kitchen1", StaffRole::Kitchen),
        ("boss", StaffRole::Manager),
    ] {
        staff::create(
            &db.pool,
            StaffCreate {
                username: username.to_string(),
                password: TEST_PASSWORD.to_string(),
                display_name: None,
                role,
            },
        )
        .await
        .expect("Failed to seed staff");
    }

    let state = ServerState::new(test_config(db_path, work_dir), db.pool.clone());
    let router = build_router(state.clone());

    TestApp {
        router,
        state,
        _tmp: tmp,
    }
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(t) = token {
            builder = builder.header("Authorization", format!("Token {t}"));
        }

        let request = match body {
            Some(b) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(b.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Router call failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    pub async fn get(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, path, Some(token), None).await
    }

    pub async fn post(&self, path: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(token), Some(body)).await
    }

    pub async fn post_empty(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::POST, path, Some(token), None).await
    }

    pub async fn delete(&self, path: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, path, Some(token), None).await
    }

    /// Log a seeded user in and return the token
    pub async fn login(&self, username: &str) -> String {
        let (status, body) = self
            .request(
                Method::POST,
                "/api/auth/login",
                None,
                Some(json!({ "username": username, "password": TEST_PASSWORD })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed for {username}: {body}");
        body["token"]
            .as_str()
            .expect("login response missing token")
            .to_string()
    }

    /// Seed a table and return its id
    pub async fn create_table(&self, manager_token: &str, number: i64, capacity: i64) -> i64 {
        let (status, body) = self
            .post(
                "/api/tables",
                manager_token,
                json!({ "table_number": number, "seating_capacity": capacity }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create table failed: {body}");
        body["id"].as_i64().expect("table id missing")
    }

    /// Seed a menu item and return its id
    pub async fn create_menu_item(&self, manager_token: &str, name: &str, price: &str) -> i64 {
        let (status, body) = self
            .post(
                "/api/menu-items",
                manager_token,
                json!({ "name": name, "category": "main", "price": price }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "create menu item failed: {body}");
        body["id"].as_i64().expect("menu item id missing")
    }
}
