use thiserror::Error;

use crate::{
    db_types::{NewOrder, Order, OrderStatus},
    order_objects::Pagination,
    traits::{AccountApiError, CatalogApiError},
};

#[derive(Debug, Clone, Error)]
pub enum OrderApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("Order #{0} not found")]
    OrderNotFound(i64),
    #[error("Cannot move an order from '{from}' to '{to}'")]
    InvalidStatusChange { from: OrderStatus, to: OrderStatus },
    #[error("An order in state '{0}' can no longer be cancelled")]
    CannotCancel(OrderStatus),
    #[error("Flavor #{0} not found")]
    FlavorNotFound(i64),
    #[error("Flavor #{0} is not available right now")]
    FlavorUnavailable(i64),
    #[error("Courier #{0} not found")]
    CourierNotFound(i64),
    #[error("Courier #{0} is not available for deliveries")]
    CourierUnavailable(i64),
    #[error("Courier #{0} has not been approved by this establishment")]
    CourierNotApproved(i64),
}

impl From<sqlx::Error> for OrderApiError {
    fn from(e: sqlx::Error) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

impl From<AccountApiError> for OrderApiError {
    fn from(e: AccountApiError) -> Self {
        OrderApiError::DatabaseError(e.to_string())
    }
}

impl From<CatalogApiError> for OrderApiError {
    fn from(e: CatalogApiError) -> Self {
        match e {
            CatalogApiError::FlavorNotFound(id) => OrderApiError::FlavorNotFound(id),
            e => OrderApiError::DatabaseError(e.to_string()),
        }
    }
}

/// Storage contract for order rows.
///
/// These methods move data, not state machines. Whether a status change is legal is decided by
/// [`crate::OrderFlowApi`] using [`OrderStatus::can_transition_to`] before anything is written.
/// The `*_for_customer` and `*_for_establishment` variants scope the lookup with an ownership
/// `WHERE` clause; a non-owner simply sees no row.
#[allow(async_fn_in_trait)]
pub trait OrderManagement {
    /// Inserts the order in the `Received` state and returns the stored row.
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, OrderApiError>;

    async fn fetch_order_for_customer(&self, order_id: i64, customer_id: i64) -> Result<Option<Order>, OrderApiError>;

    /// Fetches the order only if its flavor belongs to the given establishment.
    async fn fetch_order_for_establishment(
        &self,
        order_id: i64,
        establishment_id: i64,
    ) -> Result<Option<Order>, OrderApiError>;

    async fn set_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError>;

    /// Assigns the courier and moves the order to `EnRoute` in a single write.
    async fn assign_courier(&self, order_id: i64, courier_id: i64) -> Result<Order, OrderApiError>;

    /// Deletes the order, scoped to the owning customer. Zero matched rows is reported as
    /// [`OrderApiError::OrderNotFound`], never as a silent success.
    async fn delete_order(&self, order_id: i64, customer_id: i64) -> Result<(), OrderApiError>;

    /// One page of the customer's orders, undelivered first, newest first within each tier,
    /// together with the total row count.
    async fn order_history(&self, customer_id: i64, pagination: &Pagination)
        -> Result<(Vec<Order>, u64), OrderApiError>;
}
