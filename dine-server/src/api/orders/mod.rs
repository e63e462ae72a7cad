//! Order API Module

mod handler;

use axum::{Router, middleware, routing::delete, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("orders:view")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}/add_item", post(handler::add_item))
        .route("/{id}/remove_item", delete(handler::remove_item))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn(require_permission("orders:manage")));

    // Kitchen and waiters move orders through preparation
    let progress_routes = Router::new()
        .route("/{id}/send_to_kitchen", post(handler::send_to_kitchen))
        .route("/{id}/mark_served", post(handler::mark_served))
        .layer(middleware::from_fn(require_permission("orders:progress")));

    read_routes.merge(manage_routes).merge(progress_routes)
}
