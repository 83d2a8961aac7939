use thiserror::Error;

use crate::db_types::{Flavor, FlavorUpdate, Interest, NewFlavor};

#[derive(Debug, Clone, Error)]
pub enum CatalogApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Flavor #{0} not found")]
    FlavorNotFound(i64),
    #[error("Establishment #{0} not found")]
    EstablishmentNotFound(i64),
}

impl From<sqlx::Error> for CatalogApiError {
    fn from(e: sqlx::Error) -> Self {
        CatalogApiError::DatabaseError(e.to_string())
    }
}

/// Storage contract for the menu: flavors, their availability flag, and the "tell me when this is
/// back" interest registrations.
///
/// Every write is scoped to the owning establishment. A flavor id that resolves to another
/// establishment's flavor behaves exactly like a missing one.
#[allow(async_fn_in_trait)]
pub trait CatalogManagement {
    async fn insert_flavor(&self, flavor: &NewFlavor) -> Result<Flavor, CatalogApiError>;

    async fn fetch_flavor(&self, flavor_id: i64) -> Result<Option<Flavor>, CatalogApiError>;

    async fn update_flavor(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        update: &FlavorUpdate,
    ) -> Result<Flavor, CatalogApiError>;

    async fn delete_flavor(&self, establishment_id: i64, flavor_id: i64) -> Result<(), CatalogApiError>;

    /// Sets (not toggles) the availability flag and returns the updated row.
    async fn set_flavor_availability(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        available: bool,
    ) -> Result<Flavor, CatalogApiError>;

    /// The establishment's full menu, available flavors first.
    async fn fetch_menu(&self, establishment_id: i64) -> Result<Vec<Flavor>, CatalogApiError>;

    /// Records that the customer wants to hear about the flavor becoming available. Repeats are
    /// absorbed; there is one row per `(customer, flavor)` pair.
    async fn register_interest(&self, customer_id: i64, flavor_id: i64) -> Result<Interest, CatalogApiError>;

    /// The customers who registered interest in the flavor.
    async fn fetch_interested_customers(&self, flavor_id: i64) -> Result<Vec<i64>, CatalogApiError>;
}
