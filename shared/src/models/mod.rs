//! Data models
//!
//! Shared between delivery-server and dashboard clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod address;
pub mod assignment;
pub mod branch;
pub mod customer;
pub mod menu;
pub mod order;
pub mod rider;

// Re-exports
pub use address::*;
pub use assignment::*;
pub use branch::*;
pub use customer::*;
pub use menu::*;
pub use order::*;
pub use rider::*;
