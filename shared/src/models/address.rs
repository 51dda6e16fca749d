//! Delivery Address Value Type

use serde::{Deserialize, Serialize};

/// Structured delivery address.
///
/// The core only ever works with this type; it is flattened into
/// columns at the persistence boundary, never stored as a JSON blob.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DeliveryAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}
