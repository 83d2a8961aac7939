//! Courier availability and the courier-establishment association handshake.

use std::fmt::Debug;

use log::info;

use crate::{
    db_types::{Association, Courier},
    traits::{AccountApiError, CourierManagement},
};

pub struct CourierApi<B> {
    db: B,
}

impl<B: Debug> Debug for CourierApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CourierApi ({:?})", self.db)
    }
}

impl<B> CourierApi<B>
where B: CourierManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    /// Sets (not toggles) the courier's availability flag.
    pub async fn set_availability(&self, courier_id: i64, available: bool) -> Result<Courier, AccountApiError> {
        let courier = self.db.set_courier_availability(courier_id, available).await?;
        info!("🛵️ Courier {courier_id} is now {}", if courier.available { "available" } else { "off duty" });
        Ok(courier)
    }

    /// A courier asks to deliver for an establishment. The association starts as `pending` and
    /// asking again returns the existing row, whatever its state.
    pub async fn request_association(
        &self,
        courier_id: i64,
        establishment_id: i64,
    ) -> Result<Association, AccountApiError> {
        let association = self.db.request_association(courier_id, establishment_id).await?;
        info!("🛵️ Courier {courier_id} requested an association with establishment {establishment_id}");
        Ok(association)
    }

    /// The establishment approves the courier. Approving twice is a no-op, and approving a courier
    /// who never asked creates the association directly as `approved`.
    pub async fn approve_courier(&self, establishment_id: i64, courier_id: i64) -> Result<Association, AccountApiError> {
        let association = self.db.approve_association(establishment_id, courier_id).await?;
        info!("🛵️ Establishment {establishment_id} approved courier {courier_id}");
        Ok(association)
    }
}
