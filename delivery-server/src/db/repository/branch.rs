//! Branch Repository

use super::{RepoResult, SqliteTx};
use shared::models::Branch;
use sqlx::SqlitePool;

const BRANCH_SELECT: &str =
    "SELECT id, name, address, latitude, longitude, is_active, created_at, updated_at FROM branch";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Branch>> {
    let sql = format!("{BRANCH_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Branch>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<Option<Branch>> {
    let sql = format!("{BRANCH_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Branch>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}
