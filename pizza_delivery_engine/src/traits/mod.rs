//! # Database backend contracts.
//!
//! This module defines the trait seams that a persistence backend must implement to power the
//! marketplace. The engine's public API types ([`crate::AuthApi`], [`crate::OrderFlowApi`],
//! [`crate::CatalogApi`] and friends) are generic over these traits, so the HTTP layer never talks
//! to a concrete database directly.
//!
//! * [`CustomerManagement`], [`EstablishmentManagement`] and [`CourierManagement`] cover the three
//!   principal kinds: storage, lookup, profile updates and deletion.
//! * [`OrderManagement`] covers the order lifecycle rows. Status *rules* (which transitions are
//!   legal) live in [`crate::db_types::OrderStatus`] and are enforced by the API layer, not here.
//! * [`CatalogManagement`] covers flavors, availability and customer interest registrations.
//! * [`NotificationManagement`] covers the per-principal message inbox.
mod catalog_management;
mod courier_management;
mod customer_management;
mod establishment_management;
mod notification_management;
mod order_management;

pub use catalog_management::{CatalogApiError, CatalogManagement};
pub use courier_management::CourierManagement;
pub use customer_management::{AccountApiError, CustomerManagement};
pub use establishment_management::EstablishmentManagement;
pub use notification_management::NotificationManagement;
pub use order_management::{OrderApiError, OrderManagement};
