//! Branch Price Resolver
//!
//! Resolves the effective unit price of a menu item at one branch.
//! An item is orderable only when a branch mapping row exists, the
//! catalog entry is active, and the mapping is flagged available —
//! otherwise the resolver answers `None` and the caller rejects the
//! line. Client-supplied prices never enter this path.

use crate::db::repository::{RepoResult, SqliteTx, menu};

/// Resolved unit price for `(branch, item)`, or `None` when the item is
/// not orderable at this branch.
///
/// Runs inside the order-creation transaction so the price that is
/// snapshotted is the price that was checked.
pub async fn resolve_price_tx(
    tx: &mut SqliteTx<'_>,
    branch_id: i64,
    menu_item_id: i64,
) -> RepoResult<Option<f64>> {
    let row = menu::find_branch_price_tx(tx, branch_id, menu_item_id).await?;
    Ok(row.filter(|p| p.is_available).map(|p| p.effective_price()))
}
