//! Actor Extractor
//!
//! Materializes the gateway-asserted identity headers into an [`Actor`]

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{Actor, Role};
use crate::core::ServerState;
use crate::utils::AppError;

fn header_i64(parts: &Parts, name: &str) -> Option<i64> {
    parts
        .headers
        .get(name)
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.parse().ok())
}

impl FromRequestParts<ServerState> for Actor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(actor) = parts.extensions.get::<Actor>() {
            return Ok(actor.clone());
        }

        let role = parts
            .headers
            .get("x-actor-role")
            .and_then(|h| h.to_str().ok())
            .and_then(Role::parse)
            .ok_or(AppError::Unauthorized)?;

        let user_id = header_i64(parts, "x-actor-id").ok_or(AppError::Unauthorized)?;

        let actor = Actor {
            role,
            user_id,
            branch_id: header_i64(parts, "x-actor-branch-id"),
            rider_id: header_i64(parts, "x-actor-rider-id"),
        };

        // Store in extensions for potential reuse
        parts.extensions.insert(actor.clone());

        Ok(actor)
    }
}
