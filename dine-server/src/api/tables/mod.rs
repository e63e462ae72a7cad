//! Dining Table API Module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/dashboard", get(handler::dashboard))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission("tables:view")));

    let waiter_routes = Router::new()
        .route("/{id}/request_bill", post(handler::request_bill))
        .layer(middleware::from_fn(require_permission("tables:request_bill")));

    let manage_routes = Router::new()
        .route("/", post(handler::create))
        .route(
            "/{id}",
            axum::routing::put(handler::update).delete(handler::delete),
        )
        .route("/{id}/close", post(handler::close))
        .route("/{id}/reopen", post(handler::reopen))
        .layer(middleware::from_fn(require_permission("tables:manage")));

    read_routes.merge(waiter_routes).merge(manage_routes)
}
