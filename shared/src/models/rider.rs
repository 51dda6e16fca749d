//! Rider Models

use serde::{Deserialize, Serialize};

/// Rider availability status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum RiderStatus {
    /// On shift, free for assignment
    Active,
    /// Off shift
    Inactive,
    /// Carrying an active delivery (at most one at a time)
    Busy,
}

impl RiderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiderStatus::Active => "ACTIVE",
            RiderStatus::Inactive => "INACTIVE",
            RiderStatus::Busy => "BUSY",
        }
    }
}

impl std::fmt::Display for RiderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rider entity (delivery agent belonging to one branch)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Rider {
    pub id: i64,
    pub branch_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_plate: Option<String>,
    pub status: RiderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Last-known rider position (upsert, latest write wins, no history)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RiderLocation {
    pub rider_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    pub updated_at: i64,
}
