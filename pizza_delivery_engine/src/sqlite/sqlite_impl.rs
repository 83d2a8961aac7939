//! `SqliteDatabase` is the concrete backend for the marketplace engine.
//!
//! It implements every trait in the [`crate::traits`] module by delegating to the plain query
//! functions in [`super::db`].
use std::fmt::Debug;

use sqlx::SqlitePool;

use super::db::{couriers, customers, db_url, establishments, flavors, new_pool, notifications, orders, run_migrations};
use crate::{
    db_types::{
        Association,
        Courier,
        CourierUpdate,
        Customer,
        CustomerUpdate,
        Establishment,
        EstablishmentUpdate,
        Flavor,
        FlavorUpdate,
        Interest,
        NewCourier,
        NewCustomer,
        NewEstablishment,
        NewFlavor,
        NewNotification,
        NewOrder,
        Notification,
        Order,
        OrderStatus,
    },
    order_objects::Pagination,
    traits::{
        AccountApiError,
        CatalogApiError,
        CatalogManagement,
        CourierManagement,
        CustomerManagement,
        EstablishmentManagement,
        NotificationManagement,
        OrderApiError,
        OrderManagement,
    },
};

#[derive(Clone)]
pub struct SqliteDatabase {
    url: String,
    pool: SqlitePool,
}

impl Debug for SqliteDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "SqliteDatabase ({:?})", self.pool)
    }
}

impl SqliteDatabase {
    /// Connects to the database named by `PDS_DATABASE_URL` (or the default path) and applies any
    /// pending migrations.
    pub async fn new(max_connections: u32) -> Result<Self, sqlx::Error> {
        let url = db_url();
        Self::new_with_url(&url, max_connections).await
    }

    pub async fn new_with_url(url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = new_pool(url, max_connections).await?;
        run_migrations(&pool).await?;
        Ok(Self { url: url.to_string(), pool })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl CustomerManagement for SqliteDatabase {
    async fn insert_customer(&self, customer: &NewCustomer, password_hash: &str) -> Result<Customer, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        customers::insert_customer(customer, password_hash, &mut conn).await
    }

    async fn fetch_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        customers::customer_by_id(id, &mut conn).await
    }

    async fn fetch_customer_by_name(&self, name: &str) -> Result<Option<Customer>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        customers::customer_by_name(name, &mut conn).await
    }

    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        customers::update_customer(id, update, &mut conn).await
    }

    async fn delete_customer(&self, id: i64) -> Result<(), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        customers::delete_customer(id, &mut conn).await
    }
}

impl EstablishmentManagement for SqliteDatabase {
    async fn insert_establishment(
        &self,
        establishment: &NewEstablishment,
        password_hash: &str,
    ) -> Result<Establishment, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::insert_establishment(establishment, password_hash, &mut conn).await
    }

    async fn fetch_establishment_by_id(&self, id: i64) -> Result<Option<Establishment>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::establishment_by_id(id, &mut conn).await
    }

    async fn fetch_establishment_by_name(&self, name: &str) -> Result<Option<Establishment>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::establishment_by_name(name, &mut conn).await
    }

    async fn fetch_establishments(
        &self,
        pagination: &Pagination,
    ) -> Result<(Vec<Establishment>, u64), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::fetch_establishments(pagination, &mut conn).await
    }

    async fn update_establishment(
        &self,
        id: i64,
        update: &EstablishmentUpdate,
    ) -> Result<Establishment, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::update_establishment(id, update, &mut conn).await
    }

    async fn delete_establishment(&self, id: i64) -> Result<(), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        establishments::delete_establishment(id, &mut conn).await
    }
}

impl CourierManagement for SqliteDatabase {
    async fn insert_courier(&self, courier: &NewCourier, password_hash: &str) -> Result<Courier, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::insert_courier(courier, password_hash, &mut conn).await
    }

    async fn fetch_courier_by_id(&self, id: i64) -> Result<Option<Courier>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::courier_by_id(id, &mut conn).await
    }

    async fn fetch_courier_by_name(&self, name: &str) -> Result<Option<Courier>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::courier_by_name(name, &mut conn).await
    }

    async fn fetch_couriers(&self, pagination: &Pagination) -> Result<(Vec<Courier>, u64), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::fetch_couriers(pagination, &mut conn).await
    }

    async fn update_courier(&self, id: i64, update: &CourierUpdate) -> Result<Courier, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::update_courier(id, update, &mut conn).await
    }

    async fn delete_courier(&self, id: i64) -> Result<(), AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::delete_courier(id, &mut conn).await
    }

    async fn set_courier_availability(&self, id: i64, available: bool) -> Result<Courier, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::set_courier_availability(id, available, &mut conn).await
    }

    async fn request_association(
        &self,
        courier_id: i64,
        establishment_id: i64,
    ) -> Result<Association, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::request_association(courier_id, establishment_id, &mut conn).await
    }

    async fn approve_association(
        &self,
        establishment_id: i64,
        courier_id: i64,
    ) -> Result<Association, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::approve_association(establishment_id, courier_id, &mut conn).await
    }

    async fn fetch_association(
        &self,
        courier_id: i64,
        establishment_id: i64,
    ) -> Result<Option<Association>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        couriers::fetch_association(courier_id, establishment_id, &mut conn).await
    }
}

impl CatalogManagement for SqliteDatabase {
    async fn insert_flavor(&self, flavor: &NewFlavor) -> Result<Flavor, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::insert_flavor(flavor, &mut conn).await
    }

    async fn fetch_flavor(&self, flavor_id: i64) -> Result<Option<Flavor>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::flavor_by_id(flavor_id, &mut conn).await
    }

    async fn update_flavor(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        update: &FlavorUpdate,
    ) -> Result<Flavor, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::update_flavor(establishment_id, flavor_id, update, &mut conn).await
    }

    async fn delete_flavor(&self, establishment_id: i64, flavor_id: i64) -> Result<(), CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::delete_flavor(establishment_id, flavor_id, &mut conn).await
    }

    async fn set_flavor_availability(
        &self,
        establishment_id: i64,
        flavor_id: i64,
        available: bool,
    ) -> Result<Flavor, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::set_flavor_availability(establishment_id, flavor_id, available, &mut conn).await
    }

    async fn fetch_menu(&self, establishment_id: i64) -> Result<Vec<Flavor>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::fetch_menu(establishment_id, &mut conn).await
    }

    async fn register_interest(&self, customer_id: i64, flavor_id: i64) -> Result<Interest, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::register_interest(customer_id, flavor_id, &mut conn).await
    }

    async fn fetch_interested_customers(&self, flavor_id: i64) -> Result<Vec<i64>, CatalogApiError> {
        let mut conn = self.pool.acquire().await.map_err(|e| CatalogApiError::DatabaseError(e.to_string()))?;
        flavors::fetch_interested_customers(flavor_id, &mut conn).await
    }
}

impl OrderManagement for SqliteDatabase {
    async fn insert_order(&self, order: &NewOrder) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::insert_order(order, &mut conn).await
    }

    async fn fetch_order_for_customer(
        &self,
        order_id: i64,
        customer_id: i64,
    ) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_for_customer(order_id, customer_id, &mut conn).await
    }

    async fn fetch_order_for_establishment(
        &self,
        order_id: i64,
        establishment_id: i64,
    ) -> Result<Option<Order>, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::fetch_order_for_establishment(order_id, establishment_id, &mut conn).await
    }

    async fn set_order_status(&self, order_id: i64, status: OrderStatus) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::set_order_status(order_id, status, &mut conn).await
    }

    async fn assign_courier(&self, order_id: i64, courier_id: i64) -> Result<Order, OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::assign_courier(order_id, courier_id, &mut conn).await
    }

    async fn delete_order(&self, order_id: i64, customer_id: i64) -> Result<(), OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::delete_order(order_id, customer_id, &mut conn).await
    }

    async fn order_history(
        &self,
        customer_id: i64,
        pagination: &Pagination,
    ) -> Result<(Vec<Order>, u64), OrderApiError> {
        let mut conn = self.pool.acquire().await?;
        orders::order_history(customer_id, pagination, &mut conn).await
    }
}

impl NotificationManagement for SqliteDatabase {
    async fn insert_notification(&self, notification: &NewNotification) -> Result<Notification, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        notifications::insert_notification(notification, &mut conn).await
    }

    async fn notifications_for_customer(&self, customer_id: i64) -> Result<Vec<Notification>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        notifications::notifications_for_customer(customer_id, &mut conn).await
    }

    async fn notifications_for_establishment(
        &self,
        establishment_id: i64,
    ) -> Result<Vec<Notification>, AccountApiError> {
        let mut conn = self.pool.acquire().await?;
        notifications::notifications_for_establishment(establishment_id, &mut conn).await
    }
}
