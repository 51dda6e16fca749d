//! Rider API Module

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

/// Rider router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/riders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/{id}/location",
        post(handler::record_location).get(handler::get_location),
    )
}
