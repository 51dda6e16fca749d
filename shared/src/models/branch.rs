//! Branch Model

use serde::{Deserialize, Serialize};

/// Branch entity (one restaurant location of a tenant)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}
