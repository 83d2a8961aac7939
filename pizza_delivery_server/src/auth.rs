//! Access tokens.
//!
//! Logging in mints a JWT (HS256, signed with [`crate::config::AuthConfig::jwt_secret`]) that
//! carries the principal's id, role and name. The JWT middleware verifies the token on every
//! authenticated request and leaves the decoded [`JwtClaims`] in the request extensions, where
//! handlers pick them up through the `FromRequest` impl below.

use actix_web::{dev::Payload, FromRequest, HttpMessage, HttpRequest};
use chrono::Utc;
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pizza_delivery_engine::db_types::Role;
use serde::{Deserialize, Serialize};

use crate::{
    config::AuthConfig,
    errors::{AuthError, ServerError},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// The principal's row id.
    pub sub: i64,
    pub role: Role,
    pub name: String,
    /// Expiry, as a unix timestamp.
    pub exp: i64,
}

impl JwtClaims {
    /// Guards the self-service routes: the caller must hold the given role and be the owner of
    /// the addressed record. Anything else is a 403.
    pub fn require_self(&self, role: Role, owner_id: i64) -> Result<(), ServerError> {
        if self.role == role && self.sub == owner_id {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions.into())
        }
    }
}

impl FromRequest for JwtClaims {
    type Error = ServerError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<JwtClaims>().cloned();
        ready(claims.ok_or(ServerError::AuthenticationError(AuthError::MissingToken)))
    }
}

/// Signs new access tokens. Lives in the app data so the login handlers can reach it.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    token_expiry: chrono::Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.reveal().as_bytes()),
            token_expiry: config.token_expiry,
        }
    }

    pub fn issue(&self, sub: i64, role: Role, name: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + self.token_expiry).timestamp();
        let claims = JwtClaims { sub, role, name: name.to_string(), exp };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::TokenCreation(e.to_string()))
    }
}

/// Verifies access tokens. An expired or tampered token and a missing signature are all reported
/// as [`AuthError::InvalidToken`]; callers get no hint about what exactly was wrong.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        Self { decoding_key: DecodingKey::from_secret(config.jwt_secret.reveal().as_bytes()) }
    }

    pub fn decode(&self, token: &str) -> Result<JwtClaims, AuthError> {
        decode::<JwtClaims>(token, &self.decoding_key, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(|_| AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::config::AuthConfig;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig { jwt_secret: pdm_common::Secret::new(secret.to_string()), token_expiry: chrono::Duration::hours(1) }
    }

    #[test]
    fn tokens_round_trip() {
        let config = config("the-test-secret");
        let token = TokenIssuer::new(&config).issue(42, Role::Cliente, "Maria").unwrap();
        let claims = TokenVerifier::new(&config).decode(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, Role::Cliente);
        assert_eq!(claims.name, "Maria");
    }

    #[test]
    fn a_different_key_is_rejected() {
        let token = TokenIssuer::new(&config("key-one")).issue(1, Role::Entregador, "Zé").unwrap();
        let err = TokenVerifier::new(&config("key-two")).decode(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let config =
            AuthConfig { jwt_secret: pdm_common::Secret::new("k".into()), token_expiry: chrono::Duration::hours(-2) };
        let token = TokenIssuer::new(&config).issue(1, Role::Cliente, "Maria").unwrap();
        let err = TokenVerifier::new(&config).decode(&token).unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn require_self_checks_role_and_id() {
        let claims = JwtClaims { sub: 3, role: Role::Cliente, name: "Maria".into(), exp: i64::MAX };
        assert!(claims.require_self(Role::Cliente, 3).is_ok());
        assert!(claims.require_self(Role::Cliente, 4).is_err());
        assert!(claims.require_self(Role::Estabelecimento, 3).is_err());
    }
}
