//! Rider API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::{Actor, Role};
use crate::core::ServerState;
use crate::utils::{AppError, AppResponse, AppResult, ok};
use shared::models::RiderLocation;

/// Position report payload
#[derive(Debug, Deserialize, Validate)]
pub struct LocationUpdate {
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
}

/// Riders report their own position; admins may write on their behalf
fn may_touch_rider(actor: &Actor, rider_id: i64) -> bool {
    match actor.role {
        Role::Rider => actor.rider_id == Some(rider_id),
        Role::Admin | Role::BranchManager => true,
        Role::Customer => false,
    }
}

/// Upsert the rider's current position
pub async fn record_location(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
    Json(payload): Json<LocationUpdate>,
) -> AppResult<Json<AppResponse<()>>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if !may_touch_rider(&actor, id) {
        return Err(AppError::Forbidden(
            "Riders may only report their own position".into(),
        ));
    }

    state
        .lifecycle
        .record_rider_location(id, payload.latitude, payload.longitude)
        .await?;
    Ok(ok(()))
}

/// Last-known position, `null` if never recorded
pub async fn get_location(
    State(state): State<ServerState>,
    actor: Actor,
    Path(id): Path<i64>,
) -> AppResult<Json<Option<RiderLocation>>> {
    if !may_touch_rider(&actor, id) {
        return Err(AppError::Forbidden(
            "Not entitled to this rider's position".into(),
        ));
    }

    let location = state.lifecycle.rider_location(id).await?;
    Ok(Json(location))
}
