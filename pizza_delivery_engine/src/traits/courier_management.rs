use crate::{
    db_types::{Association, Courier, CourierUpdate, NewCourier},
    order_objects::Pagination,
    traits::AccountApiError,
};

/// Storage contract for courier principals and their establishment associations.
///
/// An association is a single row per `(courier, establishment)` pair. The courier creates it in
/// the `pending` state and the establishment flips it to `approved`. Both writes are idempotent:
/// repeating a request or an approval settles on the same row rather than erroring.
#[allow(async_fn_in_trait)]
pub trait CourierManagement {
    async fn insert_courier(&self, courier: &NewCourier, password_hash: &str) -> Result<Courier, AccountApiError>;

    async fn fetch_courier_by_id(&self, id: i64) -> Result<Option<Courier>, AccountApiError>;

    async fn fetch_courier_by_name(&self, name: &str) -> Result<Option<Courier>, AccountApiError>;

    /// Returns one page of couriers (ordered by id) together with the total row count.
    async fn fetch_couriers(&self, pagination: &Pagination) -> Result<(Vec<Courier>, u64), AccountApiError>;

    async fn update_courier(&self, id: i64, update: &CourierUpdate) -> Result<Courier, AccountApiError>;

    async fn delete_courier(&self, id: i64) -> Result<(), AccountApiError>;

    /// Sets (not toggles) the courier's availability flag and returns the updated row.
    async fn set_courier_availability(&self, id: i64, available: bool) -> Result<Courier, AccountApiError>;

    /// Creates a `pending` association, or returns the existing row for the pair unchanged.
    async fn request_association(&self, courier_id: i64, establishment_id: i64) -> Result<Association, AccountApiError>;

    /// Marks the pair's association as `approved`, creating the row if the courier never asked.
    async fn approve_association(&self, establishment_id: i64, courier_id: i64) -> Result<Association, AccountApiError>;

    async fn fetch_association(
        &self,
        courier_id: i64,
        establishment_id: i64,
    ) -> Result<Option<Association>, AccountApiError>;
}
