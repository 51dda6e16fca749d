//! Menu Repository
//!
//! Branch-scoped price rows for the pricing resolver. Absence of a
//! mapping row means the item is not offered at the branch.

use super::{RepoResult, SqliteTx};
use shared::models::BranchPrice;
use sqlx::SqlitePool;

const BRANCH_PRICE_SELECT: &str = "SELECT mi.id as menu_item_id, mi.name, mi.base_price, bmi.price_override, bmi.is_available FROM branch_menu_item bmi JOIN menu_item mi ON mi.id = bmi.menu_item_id AND mi.is_active = 1";

/// Branch price row for one item, if the branch offers it
pub async fn find_branch_price(
    pool: &SqlitePool,
    branch_id: i64,
    menu_item_id: i64,
) -> RepoResult<Option<BranchPrice>> {
    let sql = format!("{BRANCH_PRICE_SELECT} WHERE bmi.branch_id = ? AND bmi.menu_item_id = ?");
    let row = sqlx::query_as::<_, BranchPrice>(&sql)
        .bind(branch_id)
        .bind(menu_item_id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

/// Same lookup inside an open transaction (order creation reads prices
/// in the same transaction that writes the snapshot)
pub async fn find_branch_price_tx(
    tx: &mut SqliteTx<'_>,
    branch_id: i64,
    menu_item_id: i64,
) -> RepoResult<Option<BranchPrice>> {
    let sql = format!("{BRANCH_PRICE_SELECT} WHERE bmi.branch_id = ? AND bmi.menu_item_id = ?");
    let row = sqlx::query_as::<_, BranchPrice>(&sql)
        .bind(branch_id)
        .bind(menu_item_id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}
