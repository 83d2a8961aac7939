use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use pizza_delivery_engine::{
    traits::{AccountApiError, CatalogApiError, OrderApiError},
    AuthApiError,
};
use serde_json::json;
use thiserror::Error;

/// Everything the HTTP layer can fail with. Each variant maps to exactly one status code, and the
/// body is always the `{"error": "..."}` envelope.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize the server. {0}")]
    InitializeError(String),
    #[error("Configuration error. {0}")]
    ConfigurationError(String),
    #[error("Authentication error. {0}")]
    AuthenticationError(#[from] AuthError),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("A storage error occurred: {0}")]
    BackendError(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::InitializeError(_) | ServerError::ConfigurationError(_) | ServerError::BackendError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            },
            ServerError::AuthenticationError(e) => e.status_code(),
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({"error": self.to_string()}))
    }
}

#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("No access token was supplied")]
    MissingToken,
    #[error("The access token is invalid or has expired")]
    InvalidToken,
    #[error("You do not have permission to access this resource")]
    InsufficientPermissions,
    #[error("Could not create an access token. {0}")]
    TokenCreation(String),
}

impl AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingToken | AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::InsufficientPermissions => StatusCode::FORBIDDEN,
            AuthError::TokenCreation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthApiError> for ServerError {
    fn from(e: AuthApiError) -> Self {
        match &e {
            AuthApiError::NameAlreadyTaken(_) => ServerError::BadRequest(e.to_string()),
            AuthApiError::InvalidCredentials => ServerError::Unauthorized(e.to_string()),
            AuthApiError::NotFound => ServerError::NotFound(e.to_string()),
            AuthApiError::DatabaseError(_) | AuthApiError::HashingError => ServerError::BackendError(e.to_string()),
        }
    }
}

impl From<OrderApiError> for ServerError {
    fn from(e: OrderApiError) -> Self {
        use OrderApiError::*;
        match &e {
            OrderNotFound(_) | FlavorNotFound(_) | CourierNotFound(_) => ServerError::NotFound(e.to_string()),
            InvalidStatusChange { .. } | CannotCancel(_) | FlavorUnavailable(_) | CourierUnavailable(_) |
            CourierNotApproved(_) => ServerError::BadRequest(e.to_string()),
            DatabaseError(_) => ServerError::BackendError(e.to_string()),
        }
    }
}

impl From<CatalogApiError> for ServerError {
    fn from(e: CatalogApiError) -> Self {
        match &e {
            CatalogApiError::FlavorNotFound(_) | CatalogApiError::EstablishmentNotFound(_) => {
                ServerError::NotFound(e.to_string())
            },
            CatalogApiError::DatabaseError(_) => ServerError::BackendError(e.to_string()),
        }
    }
}

impl From<AccountApiError> for ServerError {
    fn from(e: AccountApiError) -> Self {
        match &e {
            AccountApiError::NameAlreadyTaken(_) => ServerError::BadRequest(e.to_string()),
            AccountApiError::NotFound => ServerError::NotFound(e.to_string()),
            AccountApiError::DatabaseError(_) => ServerError::BackendError(e.to_string()),
        }
    }
}
