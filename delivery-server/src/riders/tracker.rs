//! Rider Location Tracker
//!
//! Upsert semantics: one row per rider, latest write wins, no history.
//! Timestamps are server-side; a client cannot back-date a position.

use sqlx::SqlitePool;

use crate::db::repository::{assignment, order, rider};
use crate::orders::{LifecycleError, LifecycleResult};
use shared::models::RiderLocation;
use shared::util::now_millis;

/// Reject coordinates outside the WGS84 ranges
pub fn validate_coordinates(latitude: f64, longitude: f64) -> LifecycleResult<()> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
        return Err(LifecycleError::Validation(format!(
            "Latitude out of range: {latitude}"
        )));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
        return Err(LifecycleError::Validation(format!(
            "Longitude out of range: {longitude}"
        )));
    }
    Ok(())
}

/// Upsert the rider's current position with a server-side timestamp
pub async fn record_location(
    pool: &SqlitePool,
    rider_id: i64,
    latitude: f64,
    longitude: f64,
) -> LifecycleResult<()> {
    validate_coordinates(latitude, longitude)?;

    rider::find_by_id(pool, rider_id)
        .await?
        .ok_or(LifecycleError::NotFound {
            entity: "Rider",
            id: rider_id,
        })?;

    rider::upsert_location(pool, rider_id, latitude, longitude, now_millis()).await?;
    Ok(())
}

/// Last-known position of a rider; `None` if never recorded
pub async fn location_of(
    pool: &SqlitePool,
    rider_id: i64,
) -> LifecycleResult<Option<RiderLocation>> {
    rider::find_by_id(pool, rider_id)
        .await?
        .ok_or(LifecycleError::NotFound {
            entity: "Rider",
            id: rider_id,
        })?;
    Ok(rider::find_location(pool, rider_id).await?)
}

/// Last-known position of the rider on the order's active assignment;
/// `None` when unassigned or never recorded
pub async fn location_for_order(
    pool: &SqlitePool,
    order_id: i64,
) -> LifecycleResult<Option<RiderLocation>> {
    order::find_by_id(pool, order_id)
        .await?
        .ok_or(LifecycleError::NotFound {
            entity: "Order",
            id: order_id,
        })?;

    let Some(active) = assignment::active_for_order(pool, order_id).await? else {
        return Ok(None);
    };
    Ok(rider::find_location(pool, active.rider_id).await?)
}
