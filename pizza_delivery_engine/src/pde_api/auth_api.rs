//! Credential store and profile management for the three principal kinds.

use std::fmt::Debug;

use log::debug;

use crate::{
    db_types::{
        Courier,
        CourierUpdate,
        Customer,
        CustomerUpdate,
        Establishment,
        EstablishmentUpdate,
        NewCourier,
        NewCustomer,
        NewEstablishment,
    },
    helpers::{hash_password, verify_password},
    order_objects::{PagedResult, Pagination},
    pde_api::errors::AuthApiError,
    traits::{CourierManagement, CustomerManagement, EstablishmentManagement},
};

/// `AuthApi` owns everything credential- and profile-shaped: registration (with the duplicate-name
/// check and password hashing), login verification, and the self-service CRUD on the principal's
/// own record. Tokens are not minted here; that is the server's job.
pub struct AuthApi<B> {
    db: B,
}

impl<B: Debug> Debug for AuthApi<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AuthApi ({:?})", self.db)
    }
}

impl<B> AuthApi<B> {
    pub fn new(db: B) -> Self {
        Self { db }
    }
}

impl<B> AuthApi<B>
where B: CustomerManagement
{
    /// Registers a customer. The name must be unused among customers, and the password is hashed
    /// before it touches the backend.
    pub async fn register_customer(&self, new_customer: NewCustomer) -> Result<Customer, AuthApiError> {
        if self.db.fetch_customer_by_name(&new_customer.name).await?.is_some() {
            return Err(AuthApiError::NameAlreadyTaken(new_customer.name));
        }
        let hash = hash_password(&new_customer.password).map_err(|_| AuthApiError::HashingError)?;
        let customer = self.db.insert_customer(&new_customer, &hash).await?;
        debug!("🔑️ Customer '{}' registered with id {}", customer.name, customer.id);
        Ok(customer)
    }

    /// Verifies a customer's credentials. An unknown name and a wrong password are
    /// indistinguishable to the caller.
    pub async fn login_customer(&self, name: &str, password: &str) -> Result<Customer, AuthApiError> {
        let customer = self.db.fetch_customer_by_name(name).await?.ok_or(AuthApiError::InvalidCredentials)?;
        if !verify_password(password, &customer.password_hash) {
            return Err(AuthApiError::InvalidCredentials);
        }
        debug!("🔑️ Customer '{}' logged in", customer.name);
        Ok(customer)
    }

    pub async fn fetch_customer(&self, id: i64) -> Result<Customer, AuthApiError> {
        self.db.fetch_customer_by_id(id).await?.ok_or(AuthApiError::NotFound)
    }

    pub async fn update_customer(&self, id: i64, update: CustomerUpdate) -> Result<Customer, AuthApiError> {
        if update.is_empty() {
            return self.fetch_customer(id).await;
        }
        let customer = self.db.update_customer(id, &update).await?;
        Ok(customer)
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), AuthApiError> {
        self.db.delete_customer(id).await?;
        debug!("🔑️ Customer {id} deleted their account");
        Ok(())
    }
}

impl<B> AuthApi<B>
where B: EstablishmentManagement
{
    pub async fn register_establishment(
        &self,
        new_establishment: NewEstablishment,
    ) -> Result<Establishment, AuthApiError> {
        if self.db.fetch_establishment_by_name(&new_establishment.name).await?.is_some() {
            return Err(AuthApiError::NameAlreadyTaken(new_establishment.name));
        }
        let hash = hash_password(&new_establishment.password).map_err(|_| AuthApiError::HashingError)?;
        let establishment = self.db.insert_establishment(&new_establishment, &hash).await?;
        debug!("🔑️ Establishment '{}' registered with id {}", establishment.name, establishment.id);
        Ok(establishment)
    }

    pub async fn login_establishment(&self, name: &str, password: &str) -> Result<Establishment, AuthApiError> {
        let establishment =
            self.db.fetch_establishment_by_name(name).await?.ok_or(AuthApiError::InvalidCredentials)?;
        if !verify_password(password, &establishment.password_hash) {
            return Err(AuthApiError::InvalidCredentials);
        }
        debug!("🔑️ Establishment '{}' logged in", establishment.name);
        Ok(establishment)
    }

    pub async fn fetch_establishment(&self, id: i64) -> Result<Establishment, AuthApiError> {
        self.db.fetch_establishment_by_id(id).await?.ok_or(AuthApiError::NotFound)
    }

    pub async fn fetch_establishments(
        &self,
        pagination: Pagination,
    ) -> Result<PagedResult<Establishment>, AuthApiError> {
        let pagination = pagination.sanitized();
        let (establishments, total) = self.db.fetch_establishments(&pagination).await?;
        Ok(PagedResult::new(establishments, total, &pagination))
    }

    pub async fn update_establishment(
        &self,
        id: i64,
        update: EstablishmentUpdate,
    ) -> Result<Establishment, AuthApiError> {
        if update.is_empty() {
            return self.fetch_establishment(id).await;
        }
        let establishment = self.db.update_establishment(id, &update).await?;
        Ok(establishment)
    }

    pub async fn delete_establishment(&self, id: i64) -> Result<(), AuthApiError> {
        self.db.delete_establishment(id).await?;
        debug!("🔑️ Establishment {id} deleted their account");
        Ok(())
    }
}

impl<B> AuthApi<B>
where B: CourierManagement
{
    pub async fn register_courier(&self, new_courier: NewCourier) -> Result<Courier, AuthApiError> {
        if self.db.fetch_courier_by_name(&new_courier.name).await?.is_some() {
            return Err(AuthApiError::NameAlreadyTaken(new_courier.name));
        }
        let hash = hash_password(&new_courier.password).map_err(|_| AuthApiError::HashingError)?;
        let courier = self.db.insert_courier(&new_courier, &hash).await?;
        debug!("🔑️ Courier '{}' registered with id {}", courier.name, courier.id);
        Ok(courier)
    }

    pub async fn login_courier(&self, name: &str, password: &str) -> Result<Courier, AuthApiError> {
        let courier = self.db.fetch_courier_by_name(name).await?.ok_or(AuthApiError::InvalidCredentials)?;
        if !verify_password(password, &courier.password_hash) {
            return Err(AuthApiError::InvalidCredentials);
        }
        debug!("🔑️ Courier '{}' logged in", courier.name);
        Ok(courier)
    }

    pub async fn fetch_courier(&self, id: i64) -> Result<Courier, AuthApiError> {
        self.db.fetch_courier_by_id(id).await?.ok_or(AuthApiError::NotFound)
    }

    pub async fn fetch_couriers(&self, pagination: Pagination) -> Result<PagedResult<Courier>, AuthApiError> {
        let pagination = pagination.sanitized();
        let (couriers, total) = self.db.fetch_couriers(&pagination).await?;
        Ok(PagedResult::new(couriers, total, &pagination))
    }

    pub async fn update_courier(&self, id: i64, update: CourierUpdate) -> Result<Courier, AuthApiError> {
        if update.is_empty() {
            return self.fetch_courier(id).await;
        }
        let courier = self.db.update_courier(id, &update).await?;
        Ok(courier)
    }

    pub async fn delete_courier(&self, id: i64) -> Result<(), AuthApiError> {
        self.db.delete_courier(id).await?;
        debug!("🔑️ Courier {id} deleted their account");
        Ok(())
    }
}
