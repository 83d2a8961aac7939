//! Pizza Delivery Engine
//!
//! The engine is the persistence and domain-logic half of the marketplace. The HTTP server is a
//! separate crate that drives everything through the types exported here.
//!
//! The library is split in two:
//! 1. Database contracts and the SQLite backend ([`mod@traits`] and [`SqliteDatabase`]). You
//!    should never need to reach into the database directly; the exception is the row types in
//!    [`mod@db_types`], which are public.
//! 2. The public API ([`AuthApi`], [`OrderFlowApi`], [`CatalogApi`], [`CourierApi`],
//!    [`NotificationApi`]). These hold the business rules and are generic over the backend
//!    traits, which keeps the HTTP layer testable against mocks.
pub mod db_types;
pub mod helpers;
mod pde_api;
mod sqlite;
pub mod traits;

pub use pde_api::{
    auth_api::AuthApi,
    catalog_api::CatalogApi,
    courier_api::CourierApi,
    errors::AuthApiError,
    notification_api::NotificationApi,
    order_flow_api::OrderFlowApi,
    order_objects,
};
pub use sqlite::{
    db::{db_url, new_pool, run_migrations},
    SqliteDatabase,
};
