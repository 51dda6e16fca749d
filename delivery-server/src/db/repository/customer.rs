//! Customer Repository

use super::{RepoResult, SqliteTx};
use shared::models::Customer;
use sqlx::SqlitePool;

const CUSTOMER_SELECT: &str =
    "SELECT id, name, phone, email, is_active, created_at, updated_at FROM customer";

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn find_by_id_tx(tx: &mut SqliteTx<'_>, id: i64) -> RepoResult<Option<Customer>> {
    let sql = format!("{CUSTOMER_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Customer>(&sql)
        .bind(id)
        .fetch_optional(&mut **tx)
        .await?;
    Ok(row)
}
