//! Order Assignment Models

use serde::{Deserialize, Serialize};

use crate::order::AssignmentStatus;

/// Join between an order and the rider delivering it.
///
/// An order has at most one active assignment at a time; cancelled
/// attempts stay behind as history rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderAssignment {
    pub id: i64,
    pub order_id: i64,
    pub rider_id: i64,
    pub status: AssignmentStatus,
    pub assigned_at: i64,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
}

/// Customer rating attached to a completed assignment (one per
/// assignment, does not affect order or rider status)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DeliveryRating {
    pub id: i64,
    pub assignment_id: i64,
    pub rating: i64,
    pub feedback: Option<String>,
    pub created_at: i64,
}
