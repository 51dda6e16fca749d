//! Shared types for the delivery platform
//!
//! Domain models, the unified order status vocabulary, and ID/time
//! utilities used by the server and by API clients.

pub mod models;
pub mod order;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

// Status vocabulary re-exports (for convenient access)
pub use order::{AssignmentStatus, OrderStatus};
