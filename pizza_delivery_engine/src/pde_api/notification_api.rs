use std::fmt::Debug;

use crate::{
    db_types::Notification,
    traits::{AccountApiError, NotificationManagement},
};

/// Read access to the per-principal message inbox.
pub struct NotificationApi<B> {
    db: B,
}

impl<B: Debug> Debug for NotificationApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NotificationApi ({:?})", self.db)
    }
}

impl<B> NotificationApi<B>
where B: NotificationManagement
{
    pub fn new(db: B) -> Self {
        Self { db }
    }

    pub async fn for_customer(&self, customer_id: i64) -> Result<Vec<Notification>, AccountApiError> {
        self.db.notifications_for_customer(customer_id).await
    }

    pub async fn for_establishment(&self, establishment_id: i64) -> Result<Vec<Notification>, AccountApiError> {
        self.db.notifications_for_establishment(establishment_id).await
    }
}
