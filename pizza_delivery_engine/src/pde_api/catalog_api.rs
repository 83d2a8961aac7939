//! Menu management: flavors, availability and interest registrations.

use std::fmt::Debug;

use log::{debug, info};

use crate::{
    db_types::{Flavor, FlavorUpdate, Interest, NewFlavor, NewNotification},
    traits::{CatalogApiError, CatalogManagement, NotificationManagement},
};

pub struct CatalogApi<B> {
    db: B,
}

impl<B: Debug> Debug for CatalogApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CatalogApi ({:?})", self.db)
    }
}

impl<B> CatalogApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement
{
    /// Adds a flavor to the establishment's menu. The owner is stamped from the authenticated
    /// principal, never from the payload.
    pub async fn create_flavor(&self, establishment_id: i64, flavor: NewFlavor) -> Result<Flavor, CatalogApiError> {
        let flavor = NewFlavor { establishment_id, ..flavor };
        let flavor = self.db.insert_flavor(&flavor).await?;
        info!("🍕️ Establishment {establishment_id} added '{}' to the menu", flavor.name);
        Ok(flavor)
    }

    pub async fn fetch_flavor(&self, flavor_id: i64) -> Result<Flavor, CatalogApiError> {
        self.db.fetch_flavor(flavor_id).await?.ok_or(CatalogApiError::FlavorNotFound(flavor_id))
    }

    pub async fn update_flavor(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        update: FlavorUpdate,
    ) -> Result<Flavor, CatalogApiError> {
        if update.is_empty() {
            let flavor = self.fetch_flavor(flavor_id).await?;
            if flavor.establishment_id != establishment_id {
                return Err(CatalogApiError::FlavorNotFound(flavor_id));
            }
            return Ok(flavor);
        }
        self.db.update_flavor(establishment_id, flavor_id, &update).await
    }

    pub async fn delete_flavor(&self, establishment_id: i64, flavor_id: i64) -> Result<(), CatalogApiError> {
        self.db.delete_flavor(establishment_id, flavor_id).await?;
        info!("🍕️ Establishment {establishment_id} removed flavor {flavor_id} from the menu");
        Ok(())
    }

    /// The menu as a customer sees it, available flavors first.
    pub async fn menu_for_customer(&self, establishment_id: i64) -> Result<Vec<Flavor>, CatalogApiError> {
        self.db.fetch_menu(establishment_id).await
    }

    /// Registers the customer's interest in a flavor. The flavor must exist; repeats collapse
    /// into the single existing row.
    pub async fn register_interest(&self, customer_id: i64, flavor_id: i64) -> Result<Interest, CatalogApiError> {
        let _flavor = self.fetch_flavor(flavor_id).await?;
        let interest = self.db.register_interest(customer_id, flavor_id).await?;
        debug!("🍕️ Customer {customer_id} wants to know when flavor {flavor_id} is available");
        Ok(interest)
    }
}

impl<B> CatalogApi<B>
where B: CatalogManagement + NotificationManagement
{
    /// Sets (not toggles) the flavor's availability. Setting an already-correct flag is a no-op
    /// that succeeds. When the flag flips to available, every customer with a registered interest
    /// gets a notification.
    pub async fn set_flavor_availability(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        available: bool,
    ) -> Result<Flavor, CatalogApiError> {
        let before = self.fetch_flavor(flavor_id).await?;
        if before.establishment_id != establishment_id {
            return Err(CatalogApiError::FlavorNotFound(flavor_id));
        }
        let flavor = self.db.set_flavor_availability(establishment_id, flavor_id, available).await?;
        info!(
            "🍕️ Flavor '{}' is now {}",
            flavor.name,
            if flavor.available { "available" } else { "unavailable" }
        );
        if flavor.available && !before.available {
            self.notify_interested(&flavor).await?;
        }
        Ok(flavor)
    }

    async fn notify_interested(&self, flavor: &Flavor) -> Result<(), CatalogApiError> {
        let customers = self.db.fetch_interested_customers(flavor.id).await?;
        let count = customers.len();
        for customer_id in customers {
            let message = format!("O sabor '{}' está disponível novamente!", flavor.name);
            let notification = NewNotification::for_customer(customer_id, message);
            self.db
                .insert_notification(&notification)
                .await
                .map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        }
        if count > 0 {
            debug!("🔔️ Notified {count} customers that '{}' is back", flavor.name);
        }
        Ok(())
    }
}
