//! The HTTP surface of the pizza delivery marketplace.
//!
//! Everything stateful lives in [`pizza_delivery_engine`]; this crate adds the REST routes, JWT
//! authentication and the role-based access control on top. Start it with
//! [`server::run_server`], or assemble your own instance from [`server::create_server_instance`].

pub mod auth;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
