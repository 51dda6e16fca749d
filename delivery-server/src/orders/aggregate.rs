//! Order Aggregate Builder
//!
//! Builds the one-object order view: order scalars, denormalized
//! customer and branch, the assigned rider (if any) with last-known
//! position, and the full line-item list. Rider fields come from the
//! assignment join, so an order without an active assignment simply
//! carries no rider block.

use sqlx::SqlitePool;

use crate::db::repository::{RepoResult, assignment, order};
use shared::models::{DeliveryAddress, OrderDetail};
use shared::order::OrderStatus;

/// Flat header row: order joined with customer and branch
#[derive(Debug, sqlx::FromRow)]
struct OrderHeaderRow {
    id: i64,
    customer_id: i64,
    customer_name: String,
    branch_id: i64,
    branch_name: String,
    branch_latitude: Option<f64>,
    branch_longitude: Option<f64>,
    status: OrderStatus,
    total_amount: f64,
    street: String,
    city: String,
    state: String,
    postal_code: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    created_at: i64,
    updated_at: i64,
}

const HEADER_SELECT: &str = "SELECT o.id, o.customer_id, c.name AS customer_name, o.branch_id, b.name AS branch_name, b.latitude AS branch_latitude, b.longitude AS branch_longitude, o.status, o.total_amount, o.street, o.city, o.state, o.postal_code, o.latitude, o.longitude, o.created_at, o.updated_at FROM orders o JOIN customer c ON c.id = o.customer_id JOIN branch b ON b.id = o.branch_id";

/// Full aggregate for one order, or `None` when the id does not resolve
pub async fn build(pool: &SqlitePool, order_id: i64) -> RepoResult<Option<OrderDetail>> {
    let sql = format!("{HEADER_SELECT} WHERE o.id = ?");
    let header = sqlx::query_as::<_, OrderHeaderRow>(&sql)
        .bind(order_id)
        .fetch_optional(pool)
        .await?;

    let Some(header) = header else {
        return Ok(None);
    };

    let items = order::find_item_details(pool, order_id).await?;
    let rider = assignment::assigned_rider_view(pool, order_id).await?;

    Ok(Some(OrderDetail {
        id: header.id,
        customer_id: header.customer_id,
        customer_name: header.customer_name,
        branch_id: header.branch_id,
        branch_name: header.branch_name,
        branch_latitude: header.branch_latitude,
        branch_longitude: header.branch_longitude,
        status: header.status,
        total_amount: header.total_amount,
        delivery_address: DeliveryAddress {
            street: header.street,
            city: header.city,
            state: header.state,
            postal_code: header.postal_code,
            latitude: header.latitude,
            longitude: header.longitude,
        },
        rider,
        items,
        created_at: header.created_at,
        updated_at: header.updated_at,
    }))
}
