//! Lifecycle test suites
//!
//! Every suite runs against an in-memory SQLite pool carrying the real
//! schema, with a small seeded fixture world: two branches, two
//! customers, a four-item menu and five riders in assorted states.

mod test_create;
mod test_transitions;

use super::*;
use crate::db::DbService;
use shared::models::{DeliveryAddress, OrderAssignment, OrderItemInput};

const BRANCH: i64 = 10;
const OTHER_BRANCH: i64 = 11;
const CUSTOMER: i64 = 100;
const OTHER_CUSTOMER: i64 = 101;

// Menu fixture: burger 5.00 (base), fries 3.00 (branch override of a
// 3.50 base), ramen active but not offered at BRANCH, cake offered but
// flagged unavailable.
const ITEM_BURGER: i64 = 1;
const ITEM_FRIES: i64 = 2;
const ITEM_OFF_MENU: i64 = 3;
const ITEM_SOLD_OUT: i64 = 4;

const RIDER_FREE: i64 = 500;
const RIDER_BUSY: i64 = 501;
const RIDER_INACTIVE: i64 = 502;
const RIDER_OTHER_BRANCH: i64 = 503;
const RIDER_SECOND: i64 = 504;

async fn seed(pool: &sqlx::SqlitePool) {
    let now = shared::util::now_millis();

    for (id, name) in [(CUSTOMER, "Ana Torres"), (OTHER_CUSTOMER, "Ben Ruiz")] {
        sqlx::query(
            "INSERT INTO customer (id, name, is_active, created_at, updated_at) VALUES (?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (id, name) in [(BRANCH, "Centro"), (OTHER_BRANCH, "Norte")] {
        sqlx::query(
            "INSERT INTO branch (id, name, address, latitude, longitude, is_active, created_at, updated_at) VALUES (?, ?, 'Calle Mayor 1', 40.41, -3.70, 1, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (id, name, base_price) in [
        (ITEM_BURGER, "Burger", 5.00),
        (ITEM_FRIES, "Fries", 3.50),
        (ITEM_OFF_MENU, "Ramen", 4.00),
        (ITEM_SOLD_OUT, "Cake", 6.00),
    ] {
        sqlx::query(
            "INSERT INTO menu_item (id, name, base_price, is_active, created_at, updated_at) VALUES (?, ?, ?, 1, ?, ?)",
        )
        .bind(id)
        .bind(name)
        .bind(base_price)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (branch_id, menu_item_id, price_override, is_available) in [
        (BRANCH, ITEM_BURGER, None::<f64>, 1_i64),
        (BRANCH, ITEM_FRIES, Some(3.00), 1),
        (BRANCH, ITEM_SOLD_OUT, None, 0),
        (OTHER_BRANCH, ITEM_BURGER, Some(5.50), 1),
    ] {
        sqlx::query(
            "INSERT INTO branch_menu_item (branch_id, menu_item_id, price_override, is_available, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(branch_id)
        .bind(menu_item_id)
        .bind(price_override)
        .bind(is_available)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }

    for (id, branch_id, name, status) in [
        (RIDER_FREE, BRANCH, "Rui", "ACTIVE"),
        (RIDER_BUSY, BRANCH, "Sam", "BUSY"),
        (RIDER_INACTIVE, BRANCH, "Tea", "INACTIVE"),
        (RIDER_OTHER_BRANCH, OTHER_BRANCH, "Uma", "ACTIVE"),
        (RIDER_SECOND, BRANCH, "Val", "ACTIVE"),
    ] {
        sqlx::query(
            "INSERT INTO rider (id, branch_id, name, status, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(id)
        .bind(branch_id)
        .bind(name)
        .bind(status)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await
        .unwrap();
    }
}

async fn test_lifecycle() -> OrderLifecycle {
    let db = DbService::in_memory().await.expect("in-memory database");
    seed(&db.pool).await;
    OrderLifecycle::new(db.pool)
}

fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "Calle Luna 5".into(),
        city: "Madrid".into(),
        state: "Madrid".into(),
        postal_code: "28004".into(),
        latitude: None,
        longitude: None,
    }
}

fn line(menu_item_id: i64, quantity: i64) -> OrderItemInput {
    OrderItemInput {
        menu_item_id,
        quantity,
        special_instructions: None,
        price: None,
    }
}

fn burger_and_fries() -> CreateOrderRequest {
    CreateOrderRequest {
        branch_id: BRANCH,
        items: vec![line(ITEM_BURGER, 2), line(ITEM_FRIES, 1)],
        delivery_address: address(),
        customer_id: None,
    }
}

/// Create the standard two-line order as the fixture customer
async fn create_pending(lc: &OrderLifecycle) -> i64 {
    lc.create_order(&Actor::customer(CUSTOMER), burger_and_fries())
        .await
        .expect("create order")
        .id
}

/// Step an order forward along the staff path up to `target`
async fn advance_to(lc: &OrderLifecycle, order_id: i64, target: OrderStatus) {
    if target == OrderStatus::Pending {
        return;
    }
    let admin = Actor::admin(1);
    for status in [
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
    ] {
        lc.transition_status(&admin, order_id, status)
            .await
            .expect("advance");
        if status == target {
            return;
        }
    }
}

async fn current_status(lc: &OrderLifecycle, order_id: i64) -> OrderStatus {
    crate::db::repository::order::find_by_id(lc.pool(), order_id)
        .await
        .unwrap()
        .expect("order row")
        .status
}

async fn rider_db_status(lc: &OrderLifecycle, rider_id: i64) -> String {
    sqlx::query_scalar::<_, String>("SELECT status FROM rider WHERE id = ?")
        .bind(rider_id)
        .fetch_one(lc.pool())
        .await
        .unwrap()
}

/// Newest assignment row for an order, active or not
async fn latest_assignment(lc: &OrderLifecycle, order_id: i64) -> Option<OrderAssignment> {
    sqlx::query_as::<_, OrderAssignment>(
        "SELECT id, order_id, rider_id, status, assigned_at, started_at, completed_at FROM order_assignment WHERE order_id = ? ORDER BY id DESC LIMIT 1",
    )
    .bind(order_id)
    .fetch_optional(lc.pool())
    .await
    .unwrap()
}

async fn table_count(lc: &OrderLifecycle, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(lc.pool())
        .await
        .unwrap()
}
