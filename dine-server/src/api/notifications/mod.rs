//! Notification API Module
//!
//! Always scoped to the authenticated user; there is no cross-user access.

mod handler;

use axum::{Router, routing::get, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/notifications", get(handler::list))
        .route("/api/notifications/unread_count", get(handler::unread_count))
        .route(
            "/api/notifications/{id}/mark_as_read",
            post(handler::mark_as_read),
        )
}
