use crate::{
    db_types::{Establishment, EstablishmentUpdate, NewEstablishment},
    order_objects::Pagination,
    traits::AccountApiError,
};

/// Storage contract for establishment principals. See [`crate::traits::CustomerManagement`] for
/// the conventions around password digests and `NotFound`.
#[allow(async_fn_in_trait)]
pub trait EstablishmentManagement {
    async fn insert_establishment(
        &self,
        establishment: &NewEstablishment,
        password_hash: &str,
    ) -> Result<Establishment, AccountApiError>;

    async fn fetch_establishment_by_id(&self, id: i64) -> Result<Option<Establishment>, AccountApiError>;

    async fn fetch_establishment_by_name(&self, name: &str) -> Result<Option<Establishment>, AccountApiError>;

    /// Returns one page of establishments (ordered by id) together with the total row count.
    async fn fetch_establishments(&self, pagination: &Pagination) -> Result<(Vec<Establishment>, u64), AccountApiError>;

    async fn update_establishment(
        &self,
        id: i64,
        update: &EstablishmentUpdate,
    ) -> Result<Establishment, AccountApiError>;

    async fn delete_establishment(&self, id: i64) -> Result<(), AccountApiError>;
}
