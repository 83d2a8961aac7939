use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use pdm_common::Centavos;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sqlx::{FromRow, Type};
use thiserror::Error;

//--------------------------------------        Role        ---------------------------------------------------------
/// The three principal kinds that can authenticate against the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Cliente,
    Estabelecimento,
    Entregador,
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Cliente => write!(f, "cliente"),
            Role::Estabelecimento => write!(f, "estabelecimento"),
            Role::Entregador => write!(f, "entregador"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid conversion: {0}")]
pub struct ConversionError(pub String);

impl FromStr for Role {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cliente" => Ok(Self::Cliente),
            "estabelecimento" => Ok(Self::Estabelecimento),
            "entregador" => Ok(Self::Entregador),
            s => Err(ConversionError(format!("Invalid role: {s}"))),
        }
    }
}

//--------------------------------------      Customer      ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub address: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Registration payload for a customer. The password arrives in plaintext and is hashed by
/// [`crate::AuthApi`] before it ever reaches the database layer.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCustomer {
    pub name: String,
    pub password: String,
    pub address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl CustomerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

//--------------------------------------   Establishment    ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Establishment {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewEstablishment {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EstablishmentUpdate {
    pub name: Option<String>,
}

impl EstablishmentUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}

//--------------------------------------      Courier       ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Courier {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub vehicle_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCourier {
    pub name: String,
    pub password: String,
    pub vehicle_plate: String,
    pub vehicle_type: String,
    pub vehicle_color: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourierUpdate {
    pub name: Option<String>,
    pub vehicle_plate: Option<String>,
    pub vehicle_type: Option<String>,
    pub vehicle_color: Option<String>,
}

impl CourierUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.vehicle_plate.is_none()
            && self.vehicle_type.is_none()
            && self.vehicle_color.is_none()
    }
}

//--------------------------------------   FlavorCategory   ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FlavorCategory {
    Salgada,
    Doce,
}

impl Display for FlavorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlavorCategory::Salgada => write!(f, "salgada"),
            FlavorCategory::Doce => write!(f, "doce"),
        }
    }
}

//--------------------------------------       Flavor       ---------------------------------------------------------
/// A menu item. A flavor always belongs to exactly one establishment; nothing in the update paths
/// may move it to another owner.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Flavor {
    pub id: i64,
    pub establishment_id: i64,
    pub name: String,
    pub category: FlavorCategory,
    pub price_medium: Centavos,
    pub price_large: Centavos,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewFlavor {
    #[serde(default)]
    pub establishment_id: i64,
    pub name: String,
    pub category: FlavorCategory,
    pub price_medium: Centavos,
    pub price_large: Centavos,
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FlavorUpdate {
    pub name: Option<String>,
    pub category: Option<FlavorCategory>,
    pub price_medium: Option<Centavos>,
    pub price_large: Option<Centavos>,
}

impl FlavorUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.price_medium.is_none()
            && self.price_large.is_none()
    }
}

//--------------------------------------    OrderStatus     ---------------------------------------------------------
/// The order lifecycle. Transitions only ever move forward:
/// `Received → Preparing → Ready → EnRoute → Delivered`. The establishment side advances one hop
/// at a time; the customer's delivery confirmation may close the order from `Preparing` onward,
/// so the `pronto`/`despachar` steps are optional. Cancellation is a deletion and is legal only
/// while the order is `Received` or `Preparing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type)]
pub enum OrderStatus {
    /// The order has been placed and no payment has been confirmed.
    Received,
    /// Payment was confirmed and the establishment is preparing the order.
    Preparing,
    /// The establishment marked the order as ready for pickup.
    Ready,
    /// A courier has been assigned and the order is out for delivery.
    EnRoute,
    /// The customer confirmed receipt. Terminal.
    Delivered,
}

impl OrderStatus {
    /// The customer-facing label, which is also the wire representation.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Received => "Pedido recebido",
            OrderStatus::Preparing => "Pedido em preparo",
            OrderStatus::Ready => "Pedido pronto",
            OrderStatus::EnRoute => "Pedido em rota",
            OrderStatus::Delivered => "Pedido entregue",
        }
    }

    /// True if `next` is a legal forward transition from `self`. One hop at a time, except that
    /// `Delivered` is reachable from anywhere past payment.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Received, Preparing) |
                (Preparing, Ready) |
                (Ready, EnRoute) |
                (Preparing, Delivered) |
                (Ready, Delivered) |
                (EnRoute, Delivered)
        )
    }

    /// Cancellation is a deletion, reachable only before the establishment has finished the order.
    pub fn can_cancel(&self) -> bool {
        matches!(self, OrderStatus::Received | OrderStatus::Preparing)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pedido recebido" | "Received" => Ok(Self::Received),
            "Pedido em preparo" | "Preparing" => Ok(Self::Preparing),
            "Pedido pronto" | "Ready" => Ok(Self::Ready),
            "Pedido em rota" | "EnRoute" => Ok(Self::EnRoute),
            "Pedido entregue" | "Delivered" => Ok(Self::Delivered),
            s => Err(ConversionError(format!("Invalid order status: {s}"))),
        }
    }
}

impl Serialize for OrderStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for OrderStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

//--------------------------------------   PaymentMethod    ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Pix,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::CreditCard => write!(f, "credit_card"),
            PaymentMethod::DebitCard => write!(f, "debit_card"),
            PaymentMethod::Pix => write!(f, "pix"),
        }
    }
}

//--------------------------------------       Order        ---------------------------------------------------------
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub flavor_id: i64,
    pub quantity: i64,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub courier_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A new order as placed by a customer. The `customer_id` is always stamped from the
/// authenticated principal, never taken from the request body.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: i64,
    pub flavor_id: i64,
    pub quantity: i64,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

//--------------------------------------    Association     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AssociationStatus {
    Pending,
    Approved,
}

impl Display for AssociationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssociationStatus::Pending => write!(f, "pending"),
            AssociationStatus::Approved => write!(f, "approved"),
        }
    }
}

/// The link between a courier and an establishment. A courier requests it (`Pending`), the
/// establishment approves it (`Approved`). One row per pair.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Association {
    pub id: i64,
    pub courier_id: i64,
    pub establishment_id: i64,
    pub status: AssociationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      Interest      ---------------------------------------------------------
/// "Notify me when this flavor is available". Write-only: there is no read endpoint, the rows are
/// only consulted when a flavor flips to available.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Interest {
    pub id: i64,
    pub customer_id: i64,
    pub flavor_id: i64,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------    Notification    ---------------------------------------------------------
/// A message for exactly one customer or one establishment.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Notification {
    pub id: i64,
    pub customer_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub customer_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub message: String,
}

impl NewNotification {
    pub fn for_customer(customer_id: i64, message: impl Into<String>) -> Self {
        Self { customer_id: Some(customer_id), establishment_id: None, message: message.into() }
    }

    pub fn for_establishment(establishment_id: i64, message: impl Into<String>) -> Self {
        Self { customer_id: None, establishment_id: Some(establishment_id), message: message.into() }
    }
}
