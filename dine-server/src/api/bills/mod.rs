//! Bill API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/bills", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/pending_bills", get(handler::pending_bills))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/export_pdf", get(handler::export_pdf))
        .layer(middleware::from_fn(require_permission("bills:view")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/generate_bill", post(handler::generate_bill))
        .route("/{id}/mark_as_paid", post(handler::mark_as_paid))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_permission("bills:manage")));

    read_routes.merge(manage_routes)
}
