//! Unified order status vocabulary
//!
//! One enumeration and one transition table cover every actor path.
//! The branch dashboard drives PENDING → READY, dispatch and the rider
//! drive READY → DELIVERED. READY means branch-confirmed and awaiting
//! pickup; DELIVERING is the out-for-delivery leg.

use serde::{Deserialize, Serialize};

/// Order lifecycle status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum OrderStatus {
    /// Placed by the customer, not yet accepted
    Pending,
    /// Accepted by the branch
    Confirmed,
    /// In the kitchen
    Preparing,
    /// Packed and awaiting pickup
    Ready,
    /// Out for delivery
    Delivering,
    /// Handed to the customer (terminal)
    Delivered,
    /// Cancelled by customer or staff (terminal)
    Cancelled,
}

impl OrderStatus {
    /// Wire/storage name (SCREAMING_SNAKE_CASE, matches serde and sqlx)
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::Ready => "READY",
            OrderStatus::Delivering => "DELIVERING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether `self -> target` is an edge in the transition table.
    ///
    /// Cancellation is reachable from every non-terminal status; the
    /// forward path advances one step at a time.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        use OrderStatus::*;
        match (*self, target) {
            (Pending, Confirmed)
            | (Confirmed, Preparing)
            | (Preparing, Ready)
            | (Ready, Delivering)
            | (Delivering, Delivered) => true,
            (from, Cancelled) => !from.is_terminal(),
            _ => false,
        }
    }

    /// Statuses a rider may report on an assigned order
    pub fn rider_reportable(&self) -> bool {
        matches!(self, OrderStatus::Delivering | OrderStatus::Delivered)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery assignment sub-status
///
/// Tracks the rider leg independently of the coarse order status, so a
/// re-assignment after a cancelled attempt keeps its own history row.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum AssignmentStatus {
    /// Rider attached, not yet picked up
    Assigned,
    /// Rider picked up the order
    InProgress,
    /// Delivery completed (terminal)
    Delivered,
    /// Assignment cancelled with the order (terminal)
    Cancelled,
}

impl AssignmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentStatus::Assigned => "ASSIGNED",
            AssignmentStatus::InProgress => "IN_PROGRESS",
            AssignmentStatus::Delivered => "DELIVERED",
            AssignmentStatus::Cancelled => "CANCELLED",
        }
    }

    /// An active assignment is the one currently binding a rider
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            AssignmentStatus::Assigned | AssignmentStatus::InProgress
        )
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
