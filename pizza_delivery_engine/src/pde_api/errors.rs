use thiserror::Error;

use crate::traits::AccountApiError;

#[derive(Debug, Clone, Error)]
pub enum AuthApiError {
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("The name '{0}' is already taken")]
    NameAlreadyTaken(String),
    #[error("Invalid name or password")]
    InvalidCredentials,
    #[error("Record not found")]
    NotFound,
    #[error("Could not hash the password")]
    HashingError,
}

impl From<AccountApiError> for AuthApiError {
    fn from(e: AccountApiError) -> Self {
        match e {
            AccountApiError::DatabaseError(s) => AuthApiError::DatabaseError(s),
            AccountApiError::NameAlreadyTaken(name) => AuthApiError::NameAlreadyTaken(name),
            AccountApiError::NotFound => AuthApiError::NotFound,
        }
    }
}
