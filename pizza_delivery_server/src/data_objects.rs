//! Request and response shapes that exist only on the wire.
//!
//! The entity types themselves (customers, flavors, orders and friends) live in
//! [`pizza_delivery_engine::db_types`] and serialize directly; this module holds the envelopes and
//! the handful of payloads that do not correspond to a stored row.

use pizza_delivery_engine::db_types::{Courier, Customer, Establishment, NewOrder, PaymentMethod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustomerAuthResponse {
    pub cliente: Customer,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstablishmentAuthResponse {
    pub estabelecimento: Establishment,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CourierAuthResponse {
    pub entregador: Courier,
    pub token: String,
}

/// Body for the availability routes. A set, not a toggle.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct AvailabilityUpdate {
    pub available: bool,
}

/// Body for the dispatch route, naming the courier who takes the order out.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct DispatchRequest {
    #[serde(rename = "entregadorId")]
    pub courier_id: i64,
}

/// Query string for the menu route (`?estabelecimentoId=1`).
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MenuQuery {
    #[serde(rename = "estabelecimentoId")]
    pub establishment_id: i64,
}

/// A new order as it arrives from the customer. The customer id comes from the access token, not
/// from the body.
#[derive(Debug, Clone, Deserialize)]
pub struct NewOrderRequest {
    pub flavor_id: i64,
    pub quantity: i64,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

impl NewOrderRequest {
    pub fn into_order(self, customer_id: i64) -> NewOrder {
        NewOrder {
            customer_id,
            flavor_id: self.flavor_id,
            quantity: self.quantity,
            delivery_address: self.delivery_address,
            payment_method: self.payment_method,
        }
    }
}
