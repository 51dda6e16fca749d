//! Order Assignment Repository

use super::{RepoResult, SqliteTx};
use shared::models::{AssignedRider, OrderAssignment};
use shared::order::AssignmentStatus;
use sqlx::SqlitePool;

const ASSIGNMENT_SELECT: &str = "SELECT id, order_id, rider_id, status, assigned_at, started_at, completed_at FROM order_assignment";

/// The assignment currently binding a rider to this order, if any
pub async fn active_for_order(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Option<OrderAssignment>> {
    let sql =
        format!("{ASSIGNMENT_SELECT} WHERE order_id = ? AND status IN ('ASSIGNED', 'IN_PROGRESS')");
    let row = sqlx::query_as::<_, OrderAssignment>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn active_for_order_tx(
    tx: &mut SqliteTx<'_>,
    order_id: i64,
) -> RepoResult<Option<OrderAssignment>> {
    let sql =
        format!("{ASSIGNMENT_SELECT} WHERE order_id = ? AND status IN ('ASSIGNED', 'IN_PROGRESS')");
    let row = sqlx::query_as::<_, OrderAssignment>(&sql)
        .bind(order_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// Latest completed assignment for an order (rating target)
pub async fn completed_for_order(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Option<OrderAssignment>> {
    let sql = format!(
        "{ASSIGNMENT_SELECT} WHERE order_id = ? AND status = 'DELIVERED' ORDER BY completed_at DESC LIMIT 1"
    );
    let row = sqlx::query_as::<_, OrderAssignment>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn insert_tx(
    tx: &mut SqliteTx<'_>,
    id: i64,
    order_id: i64,
    rider_id: i64,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_assignment (id, order_id, rider_id, status, assigned_at) VALUES (?, ?, ?, 'ASSIGNED', ?)",
    )
    .bind(id)
    .bind(order_id)
    .bind(rider_id)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// ASSIGNED -> IN_PROGRESS on pickup. Guarded: 0 affected rows means
/// pickup was already reported (or the assignment moved on).
pub async fn mark_picked_tx(tx: &mut SqliteTx<'_>, id: i64, now: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE order_assignment SET status = 'IN_PROGRESS', started_at = ? WHERE id = ? AND status = 'ASSIGNED'",
    )
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected())
}

/// IN_PROGRESS -> DELIVERED on completion. Guarded like [`mark_picked_tx`].
pub async fn mark_delivered_tx(tx: &mut SqliteTx<'_>, id: i64, now: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE order_assignment SET status = 'DELIVERED', completed_at = ? WHERE id = ? AND status = 'IN_PROGRESS'",
    )
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected())
}

/// Complete an active assignment regardless of pickup sub-state (staff
/// forcing the coarse order status drags the sub-state along)
pub async fn complete_active_tx(tx: &mut SqliteTx<'_>, id: i64, now: i64) -> RepoResult<u64> {
    let result = sqlx::query(
        "UPDATE order_assignment SET status = 'DELIVERED', completed_at = ?, started_at = COALESCE(started_at, ?) WHERE id = ? AND status IN ('ASSIGNED', 'IN_PROGRESS')",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(result.rows_affected())
}

/// Terminal cancellation of an active assignment
pub async fn cancel_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<()> {
    sqlx::query(
        "UPDATE order_assignment SET status = ? WHERE id = ? AND status IN ('ASSIGNED', 'IN_PROGRESS')",
    )
    .bind(AssignmentStatus::Cancelled)
    .bind(id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Denormalized rider block for the aggregate view: active assignment
/// joined with rider identity and last-known location (LEFT JOIN — the
/// location may never have been recorded)
pub async fn assigned_rider_view(
    pool: &SqlitePool,
    order_id: i64,
) -> RepoResult<Option<AssignedRider>> {
    let row = sqlx::query_as::<_, AssignedRider>(
        "SELECT oa.id AS assignment_id, oa.status AS assignment_status, r.id AS rider_id, r.name, r.phone, r.vehicle_type, r.vehicle_plate, oa.assigned_at, oa.started_at, oa.completed_at, rl.latitude, rl.longitude, rl.updated_at AS location_updated_at FROM order_assignment oa JOIN rider r ON r.id = oa.rider_id LEFT JOIN rider_location rl ON rl.rider_id = r.id WHERE oa.order_id = ? AND oa.status IN ('ASSIGNED', 'IN_PROGRESS')",
    )
    .bind(order_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Attach a rating to a completed assignment. The UNIQUE constraint on
/// `assignment_id` surfaces a second submission as [`RepoError::Duplicate`].
pub async fn insert_rating(
    pool: &SqlitePool,
    id: i64,
    assignment_id: i64,
    rating: i64,
    feedback: Option<&str>,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO delivery_rating (id, assignment_id, rating, feedback, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(assignment_id)
    .bind(rating)
    .bind(feedback)
    .bind(now)
    .execute(pool)
    .await?;
    Ok(())
}

/// Rating attached to an assignment, if submitted
pub async fn find_rating(
    pool: &SqlitePool,
    assignment_id: i64,
) -> RepoResult<Option<shared::models::DeliveryRating>> {
    let row = sqlx::query_as::<_, shared::models::DeliveryRating>(
        "SELECT id, assignment_id, rating, feedback, created_at FROM delivery_rating WHERE assignment_id = ?",
    )
    .bind(assignment_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
