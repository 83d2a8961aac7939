use thiserror::Error;

use crate::db_types::{Customer, CustomerUpdate, NewCustomer};

#[derive(Debug, Clone, Error)]
pub enum AccountApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The name '{0}' is already taken")]
    NameAlreadyTaken(String),
    #[error("Record not found")]
    NotFound,
}

impl From<sqlx::Error> for AccountApiError {
    fn from(e: sqlx::Error) -> Self {
        AccountApiError::DatabaseError(e.to_string())
    }
}

/// Storage contract for customer principals.
///
/// The password never reaches this trait in plaintext. [`crate::AuthApi`] hashes it first and
/// hands the backend the digest.
#[allow(async_fn_in_trait)]
pub trait CustomerManagement {
    /// Persists a new customer with the given password digest and returns the stored row.
    async fn insert_customer(&self, customer: &NewCustomer, password_hash: &str) -> Result<Customer, AccountApiError>;

    async fn fetch_customer_by_id(&self, id: i64) -> Result<Option<Customer>, AccountApiError>;

    /// Names are unique per principal kind, so a name lookup returns at most one row.
    async fn fetch_customer_by_name(&self, name: &str) -> Result<Option<Customer>, AccountApiError>;

    /// Applies the non-`None` fields of `update` and returns the updated row.
    /// Returns [`AccountApiError::NotFound`] if the id does not resolve.
    async fn update_customer(&self, id: i64, update: &CustomerUpdate) -> Result<Customer, AccountApiError>;

    /// Deletes the customer. Returns [`AccountApiError::NotFound`] if no row matched.
    async fn delete_customer(&self, id: i64) -> Result<(), AccountApiError>;
}
