//! The engine's public API surface.
//!
//! Each `*Api` type is a thin generic wrapper over the backend traits in [`crate::traits`]. They
//! hold the business rules (duplicate-name checks, password hashing, status transition checks,
//! interest notifications) and leave raw storage to the backend.

pub mod auth_api;
pub mod catalog_api;
pub mod courier_api;
pub mod errors;
pub mod notification_api;
pub mod order_flow_api;
pub mod order_objects;
