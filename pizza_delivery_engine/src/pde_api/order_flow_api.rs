//! The order lifecycle state machine.
//!
//! Orders only ever move forward:
//!
//! `Received → Preparing → Ready → EnRoute → Delivered`
//!
//! The establishment-side steps advance one hop at a time. The customer's delivery confirmation
//! is legal from `Preparing` onward, so `pronto` and `despachar` are optional waypoints.
//!
//! Every mutation here follows the same shape: fetch the order through an ownership-scoped query,
//! check the transition against [`OrderStatus::can_transition_to`], then write. The scoped fetch
//! is the concurrency story too: racing writers are serialized by the database and the loser's
//! transition check fails on the refreshed state or simply overwrites (last write wins, which is
//! acceptable for a single-row status column).

use std::fmt::Debug;

use log::{debug, info};

use crate::{
    db_types::{AssociationStatus, NewOrder, Order, OrderStatus},
    order_objects::{PagedResult, Pagination},
    traits::{CatalogManagement, CourierManagement, OrderApiError, OrderManagement},
};

pub struct OrderFlowApi<B> {
    db: B,
}

impl<B: Debug> Debug for OrderFlowApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderFlowApi ({:?})", self.db)
    }
}

impl<B> OrderFlowApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + CatalogManagement
{
    /// Places a new order in the `Received` state. The flavor must exist and be on the menu right
    /// now; the customer id has already been stamped from the authenticated principal.
    pub async fn place_order(&self, order: NewOrder) -> Result<Order, OrderApiError> {
        let flavor =
            self.db.fetch_flavor(order.flavor_id).await?.ok_or(OrderApiError::FlavorNotFound(order.flavor_id))?;
        if !flavor.available {
            return Err(OrderApiError::FlavorUnavailable(flavor.id));
        }
        let order = self.db.insert_order(&order).await?;
        info!("📦️ Customer {} placed order #{} for {}x flavor #{}", order.customer_id, order.id, order.quantity, order.flavor_id);
        Ok(order)
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement
{
    pub async fn fetch_order_for_customer(&self, order_id: i64, customer_id: i64) -> Result<Order, OrderApiError> {
        self.db.fetch_order_for_customer(order_id, customer_id).await?.ok_or(OrderApiError::OrderNotFound(order_id))
    }

    /// `Received → Preparing`. Scoped to the owning customer.
    pub async fn confirm_payment(&self, order_id: i64, customer_id: i64) -> Result<Order, OrderApiError> {
        let order = self.fetch_order_for_customer(order_id, customer_id).await?;
        let updated = self.transition(&order, OrderStatus::Preparing).await?;
        info!("📦️ Payment confirmed for order #{order_id}. The kitchen is on it.");
        Ok(updated)
    }

    /// Cancellation is a deletion, legal only while the order is `Received` or `Preparing`.
    /// Scoped to the owning customer; a non-owner sees `OrderNotFound`.
    pub async fn cancel_order(&self, order_id: i64, customer_id: i64) -> Result<(), OrderApiError> {
        let order = self.fetch_order_for_customer(order_id, customer_id).await?;
        if !order.status.can_cancel() {
            return Err(OrderApiError::CannotCancel(order.status));
        }
        self.db.delete_order(order_id, customer_id).await?;
        info!("📦️ Order #{order_id} cancelled by customer {customer_id}");
        Ok(())
    }

    /// Closes the order as `Delivered`. Legal from any paid state (`Preparing`, `Ready` or
    /// `EnRoute`); the kitchen-side steps are not required to have happened first. A second
    /// confirmation on a delivered order is rejected, like every other repeated transition.
    pub async fn confirm_delivery(&self, order_id: i64, customer_id: i64) -> Result<Order, OrderApiError> {
        let order = self.fetch_order_for_customer(order_id, customer_id).await?;
        let updated = self.transition(&order, OrderStatus::Delivered).await?;
        info!("📦️ Order #{order_id} delivered. Bom apetite!");
        Ok(updated)
    }

    /// `Preparing → Ready`. Scoped to the establishment that owns the order's flavor.
    pub async fn mark_ready(&self, order_id: i64, establishment_id: i64) -> Result<Order, OrderApiError> {
        let order = self
            .db
            .fetch_order_for_establishment(order_id, establishment_id)
            .await?
            .ok_or(OrderApiError::OrderNotFound(order_id))?;
        let updated = self.transition(&order, OrderStatus::Ready).await?;
        info!("📦️ Order #{order_id} is ready for pickup");
        Ok(updated)
    }

    pub async fn order_history(
        &self,
        customer_id: i64,
        pagination: Pagination,
    ) -> Result<PagedResult<Order>, OrderApiError> {
        let pagination = pagination.sanitized();
        let (orders, total) = self.db.order_history(customer_id, &pagination).await?;
        Ok(PagedResult::new(orders, total, &pagination))
    }

    async fn transition(&self, order: &Order, to: OrderStatus) -> Result<Order, OrderApiError> {
        if !order.status.can_transition_to(to) {
            return Err(OrderApiError::InvalidStatusChange { from: order.status, to });
        }
        let updated = self.db.set_order_status(order.id, to).await?;
        debug!("📦️ Order #{} moved from '{}' to '{}'", order.id, order.status, to);
        Ok(updated)
    }
}

impl<B> OrderFlowApi<B>
where B: OrderManagement + CourierManagement
{
    /// `Ready → EnRoute`. The establishment hands the order to a courier, who must be available
    /// and hold an approved association with this establishment.
    pub async fn dispatch_order(
        &self,
        order_id: i64,
        establishment_id: i64,
        courier_id: i64,
    ) -> Result<Order, OrderApiError> {
        let order = self
            .db
            .fetch_order_for_establishment(order_id, establishment_id)
            .await?
            .ok_or(OrderApiError::OrderNotFound(order_id))?;
        if !order.status.can_transition_to(OrderStatus::EnRoute) {
            return Err(OrderApiError::InvalidStatusChange { from: order.status, to: OrderStatus::EnRoute });
        }
        let courier =
            self.db.fetch_courier_by_id(courier_id).await?.ok_or(OrderApiError::CourierNotFound(courier_id))?;
        if !courier.available {
            return Err(OrderApiError::CourierUnavailable(courier_id));
        }
        let association = self.db.fetch_association(courier_id, establishment_id).await?;
        if !matches!(association.map(|a| a.status), Some(AssociationStatus::Approved)) {
            return Err(OrderApiError::CourierNotApproved(courier_id));
        }
        let updated = self.db.assign_courier(order_id, courier_id).await?;
        info!("📦️ Order #{order_id} is out for delivery with courier {courier_id}");
        Ok(updated)
    }
}
