use crate::{
    db_types::{NewNotification, Notification},
    traits::AccountApiError,
};

/// Storage contract for the per-principal message inbox. Notifications are append-only; there is
/// no read-marking or deletion.
#[allow(async_fn_in_trait)]
pub trait NotificationManagement {
    async fn insert_notification(&self, notification: &NewNotification) -> Result<Notification, AccountApiError>;

    /// The customer's notifications, newest first.
    async fn notifications_for_customer(&self, customer_id: i64) -> Result<Vec<Notification>, AccountApiError>;

    /// The establishment's notifications, newest first.
    async fn notifications_for_establishment(
        &self,
        establishment_id: i64,
    ) -> Result<Vec<Notification>, AccountApiError>;
}
