//! Order Repository
//!
//! Row-level access for orders and line items. Status-transition rules
//! live in the lifecycle core; the guarded update here makes the edge
//! check atomic with the write.

use super::{RepoResult, SqliteTx};
use shared::models::{DeliveryAddress, Order, OrderFilter, OrderItem, OrderItemDetail};
use shared::order::OrderStatus;
use sqlx::SqlitePool;

const ORDER_SELECT: &str = "SELECT id, customer_id, branch_id, status, total_amount, street, city, state, postal_code, latitude, longitude, created_at, updated_at FROM orders";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<Option<Order>> {
    let sql = format!("{ORDER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Order>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}

/// List order ids matching the filter, newest first
pub async fn list_ids(pool: &SqlitePool, filter: &OrderFilter) -> RepoResult<Vec<i64>> {
    let mut sql = String::from("SELECT id FROM orders WHERE 1 = 1");
    if filter.status.is_some() {
        sql.push_str(" AND status = ?");
    }
    if filter.branch_id.is_some() {
        sql.push_str(" AND branch_id = ?");
    }
    if filter.customer_id.is_some() {
        sql.push_str(" AND customer_id = ?");
    }
    if filter.from.is_some() {
        sql.push_str(" AND created_at >= ?");
    }
    if filter.to.is_some() {
        sql.push_str(" AND created_at < ?");
    }
    sql.push_str(" ORDER BY created_at DESC");

    let mut query = sqlx::query_scalar::<_, i64>(&sql);
    if let Some(status) = filter.status {
        query = query.bind(status);
    }
    if let Some(branch_id) = filter.branch_id {
        query = query.bind(branch_id);
    }
    if let Some(customer_id) = filter.customer_id {
        query = query.bind(customer_id);
    }
    if let Some(from) = filter.from {
        query = query.bind(from);
    }
    if let Some(to) = filter.to {
        query = query.bind(to);
    }

    let ids = query.fetch_all(pool).await?;
    Ok(ids)
}

/// Insert the order row (status PENDING, computed total)
#[allow(clippy::too_many_arguments)]
pub async fn insert_tx(
    tx: &mut SqliteTx<'_>,
    id: i64,
    customer_id: i64,
    branch_id: i64,
    status: OrderStatus,
    total_amount: f64,
    address: &DeliveryAddress,
    now: i64,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO orders (id, customer_id, branch_id, status, total_amount, street, city, state, postal_code, latitude, longitude, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(customer_id)
    .bind(branch_id)
    .bind(status)
    .bind(total_amount)
    .bind(&address.street)
    .bind(&address.city)
    .bind(&address.state)
    .bind(&address.postal_code)
    .bind(address.latitude)
    .bind(address.longitude)
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Insert one line item with the snapshotted price
pub async fn insert_item_tx(
    tx: &mut SqliteTx<'_>,
    id: i64,
    order_id: i64,
    menu_item_id: i64,
    quantity: i64,
    price_at_time: f64,
    special_instructions: Option<&str>,
) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO order_item (id, order_id, menu_item_id, quantity, price_at_time, special_instructions) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id)
    .bind(order_id)
    .bind(menu_item_id)
    .bind(quantity)
    .bind(price_at_time)
    .bind(special_instructions)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Conditional status update: writes only if the row still holds
/// `expected`. Returns the number of affected rows (0 = lost the race
/// or the row vanished; the caller re-reads to tell which).
pub async fn update_status_guarded(
    tx: &mut SqliteTx<'_>,
    id: i64,
    expected: OrderStatus,
    target: OrderStatus,
    now: i64,
) -> RepoResult<u64> {
    let result = sqlx::query("UPDATE orders SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(target)
        .bind(now)
        .bind(id)
        .bind(expected)
        .execute(&mut **tx)
        .await?;
    Ok(result.rows_affected())
}

/// Line items for one order
pub async fn find_items(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItem>> {
    let rows = sqlx::query_as::<_, OrderItem>(
        "SELECT id, order_id, menu_item_id, quantity, price_at_time, special_instructions FROM order_item WHERE order_id = ? ORDER BY id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Denormalized line items for the aggregate view
pub async fn find_item_details(pool: &SqlitePool, order_id: i64) -> RepoResult<Vec<OrderItemDetail>> {
    let rows = sqlx::query_as::<_, OrderItemDetail>(
        "SELECT oi.menu_item_id, mi.name, mi.description, mi.category, oi.quantity, oi.price_at_time, oi.quantity * oi.price_at_time AS line_total, oi.special_instructions FROM order_item oi JOIN menu_item mi ON mi.id = oi.menu_item_id WHERE oi.order_id = ? ORDER BY oi.id",
    )
    .bind(order_id)
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Row count for an order's line items (rollback verification in tests)
pub async fn count_items(pool: &SqlitePool, order_id: i64) -> RepoResult<i64> {
    let count =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM order_item WHERE order_id = ?")
            .bind(order_id)
            .fetch_one(pool)
            .await?;
    Ok(count)
}
