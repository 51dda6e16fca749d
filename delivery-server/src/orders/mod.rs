//! Order Lifecycle Module
//!
//! The core of the service: order creation with price snapshotting,
//! state-machine-gated status transitions, rider assignment, delivery
//! completion and rating. Every multi-row write happens inside one
//! transaction; no partial state is ever observable.

pub mod aggregate;
pub mod error;
pub mod lifecycle;

pub use error::{LifecycleError, LifecycleResult};
pub use lifecycle::OrderLifecycle;
