//! Order API Module
//!
//! Maps the lifecycle operations to JSON endpoints. All business rules
//! live in the lifecycle core; handlers deserialize, call, and map.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create).get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", post(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
        .route("/{id}/assign", post(handler::assign_rider))
        .route("/{id}/rider-status", post(handler::rider_status))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/rating", post(handler::submit_rating))
        .route("/{id}/location", get(handler::rider_location))
}
