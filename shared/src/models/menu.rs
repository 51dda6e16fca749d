//! Menu Models

use serde::{Deserialize, Serialize};

/// Menu item entity (tenant-wide catalog entry)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub base_price: f64,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Branch-scoped menu mapping.
///
/// An item is orderable at a branch only when a row exists and
/// `is_available` is true; absence means "not offered here" even if
/// the catalog entry exists globally.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BranchMenuItem {
    pub branch_id: i64,
    pub menu_item_id: i64,
    /// Overrides `MenuItem::base_price` when set
    pub price_override: Option<f64>,
    pub is_available: bool,
    pub updated_at: i64,
}

/// Resolved branch price for one menu item (pricing resolver output)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BranchPrice {
    pub menu_item_id: i64,
    pub name: String,
    pub base_price: f64,
    pub price_override: Option<f64>,
    pub is_available: bool,
}

impl BranchPrice {
    /// Effective unit price at this branch
    pub fn effective_price(&self) -> f64 {
        self.price_override.unwrap_or(self.base_price)
    }
}
