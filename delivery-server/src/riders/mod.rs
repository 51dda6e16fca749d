//! Rider Module
//!
//! Live position tracking for riders. Assignment state lives with the
//! order lifecycle; this module only covers the location side.

pub mod tracker;

pub use tracker::{location_for_order, location_of, record_location, validate_coordinates};
