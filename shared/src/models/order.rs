//! Order Models

use serde::{Deserialize, Serialize};

use super::DeliveryAddress;
use crate::order::{AssignmentStatus, OrderStatus};

/// Order entity.
///
/// `total_amount` is computed once at creation from the snapshotted line
/// prices and never recomputed; cancellation only changes `status`.
/// The delivery address is stored as flat columns (see `address()`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub branch_id: i64,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Order {
    /// The structured address value the core works with
    pub fn address(&self) -> DeliveryAddress {
        DeliveryAddress {
            street: self.street.clone(),
            city: self.city.clone(),
            state: self.state.clone(),
            postal_code: self.postal_code.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Order line item. `price_at_time` is fixed at insertion; later catalog
/// or branch price changes never touch existing orders.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub price_at_time: f64,
    pub special_instructions: Option<String>,
}

/// One requested line in an order-creation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemInput {
    pub menu_item_id: i64,
    pub quantity: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    /// Ignored if present. Prices are always resolved server-side from
    /// the branch menu; a client cannot influence the total.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Order-creation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub branch_id: i64,
    pub items: Vec<OrderItemInput>,
    pub delivery_address: DeliveryAddress,
    /// Required for staff-created orders; customers always order as
    /// themselves and may omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
}

/// Listing filter. Empty filter lists everything (paginated upstream).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    /// Inclusive lower bound on `created_at` (millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<i64>,
    /// Exclusive upper bound on `created_at` (millis)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<i64>,
}

// ============================================================================
// Aggregate views
// ============================================================================

/// Full order aggregate: order scalars plus denormalized customer,
/// branch, rider (when assigned) and line items in one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetail {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub branch_id: i64,
    pub branch_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch_longitude: Option<f64>,
    pub status: OrderStatus,
    pub total_amount: f64,
    pub delivery_address: DeliveryAddress,
    /// Absent when no active assignment exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rider: Option<AssignedRider>,
    pub items: Vec<OrderItemDetail>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Denormalized rider block inside [`OrderDetail`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct AssignedRider {
    pub assignment_id: i64,
    pub assignment_status: AssignmentStatus,
    pub rider_id: i64,
    pub name: String,
    pub phone: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_plate: Option<String>,
    pub assigned_at: i64,
    pub started_at: Option<i64>,
    pub completed_at: Option<i64>,
    /// Last-known position, if the rider ever reported one
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub location_updated_at: Option<i64>,
}

/// Denormalized line item inside [`OrderDetail`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemDetail {
    pub menu_item_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: i64,
    pub price_at_time: f64,
    pub line_total: f64,
    pub special_instructions: Option<String>,
}
