//! Staff API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_manager;
use crate::core::ServerState;

/// Account administration is manager-only
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/staff", get(handler::list).post(handler::create))
        .layer(middleware::from_fn(require_manager))
}
