//! Rider Repository

use super::{RepoResult, SqliteTx};
use shared::models::{Rider, RiderLocation, RiderStatus};
use sqlx::SqlitePool;

const RIDER_SELECT: &str = "SELECT id, branch_id, name, phone, vehicle_type, vehicle_plate, status, created_at, updated_at FROM rider";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Rider>> {
    let sql = format!("{RIDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Rider>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<Option<Rider>> {
    let sql = format!("{RIDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Rider>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Conditional rider status update. The `expected` guard makes the
/// busy-check atomic with the write (two dispatchers racing for the
/// same rider: exactly one sees an affected row).
pub async fn update_status_guarded(
    tx: &mut SqliteTx<'_>,
    id: i64,
    expected: RiderStatus,
    target: RiderStatus,
    now: i64,
) -> RepoResult<u64> {
    let result =
        sqlx::query("UPDATE rider SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
            .bind(target)
            .bind(now)
            .bind(id)
            .bind(expected)
            .execute(&mut **tx)
            .await?;
    Ok(result.rows_affected())
}

/// Unconditional rider status write (completion/cancellation cleanup)
pub async fn set_status_tx(
    tx: &mut SqliteTx<'_>,
    id: i64,
    target: RiderStatus,
    now: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE rider SET status = ?, updated_at = ? WHERE id = ?")
        .bind(target)
        .bind(now)
        .bind(id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

/// Upsert the rider's last-known position (latest write wins)
pub async fn upsert_location(
    pool: &SqlitePool,
    rider_id: i64,
    latitude: f64,
    longitude: f64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO rider_location (rider_id, latitude, longitude, updated_at) VALUES (?, ?, ?, ?) ON CONFLICT(rider_id) DO UPDATE SET latitude = excluded.latitude, longitude = excluded.longitude, updated_at = excluded.updated_at",
    )
    .bind(rider_id)
    .bind(latitude)
    .bind(longitude)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_location(pool: &SqlitePool, rider_id: i64) -> RepoResult<Option<RiderLocation>> {
    let row = sqlx::query_as::<_, RiderLocation>(
        "SELECT rider_id, latitude, longitude, updated_at FROM rider_location WHERE rider_id = ?",
    )
    .bind(rider_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
