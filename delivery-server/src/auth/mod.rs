//! Authenticated-Actor Context
//!
//! Authentication itself (JWT validation, password hashing, rate
//! limiting) happens at the fronting gateway; by the time a request
//! reaches this service its identity has been verified and is carried
//! in trusted `x-actor-*` headers. This module materializes that
//! context and the core re-checks ownership on top of it.

mod actor;
mod extractor;

pub use actor::{Actor, Role};
