//! Endpoint tests.
//!
//! These drive the routes through `actix_web::test` with mocked storage backends, so they cover
//! the HTTP concerns (status codes, the error envelope, token and role enforcement) without a
//! database. The engine's own integration tests cover the storage semantics.

mod auth;
mod catalog;
mod mocks;
mod orders;

use chrono::Utc;
use pizza_delivery_engine::{
    db_types::{Courier, Customer, Flavor, FlavorCategory, Order, OrderStatus, PaymentMethod, Role},
    helpers::hash_password,
};

use crate::{auth::TokenIssuer, config::AuthConfig};

pub(crate) const TEST_PASSWORD: &str = "hunter22";

pub(crate) fn sample_customer(id: i64, name: &str) -> Customer {
    Customer {
        id,
        name: name.to_string(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        address: "Rua dos Bobos, 0".to_string(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn sample_courier(id: i64, available: bool) -> Courier {
    Courier {
        id,
        name: format!("courier-{id}"),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        vehicle_plate: "ABC-1234".to_string(),
        vehicle_type: "moto".to_string(),
        vehicle_color: "vermelha".to_string(),
        available,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn sample_flavor(id: i64, establishment_id: i64, available: bool) -> Flavor {
    Flavor {
        id,
        establishment_id,
        name: "Calabresa".to_string(),
        category: FlavorCategory::Salgada,
        price_medium: 2500.into(),
        price_large: 4500.into(),
        available,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub(crate) fn sample_order(id: i64, customer_id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        customer_id,
        flavor_id: 1,
        quantity: 2,
        delivery_address: "Rua dos Bobos, 0".to_string(),
        payment_method: PaymentMethod::Pix,
        status,
        courier_id: None,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

/// A ready-to-insert `Authorization` header for the given principal.
pub(crate) fn auth_header(config: &AuthConfig, sub: i64, role: Role, name: &str) -> (&'static str, String) {
    let token = TokenIssuer::new(config).issue(sub, role, name).unwrap();
    ("Authorization", format!("Bearer {token}"))
}
