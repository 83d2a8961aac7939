//! Server configuration.
//!
//! Everything is read from the environment with sane defaults, so `pizza_delivery_server` starts
//! with no configuration at all (albeit with a loudly-logged throwaway JWT key). The variables:
//!
//! | Variable                 | Default                              |
//! |--------------------------|--------------------------------------|
//! | `PDS_HOST`               | `127.0.0.1`                          |
//! | `PDS_PORT`               | `8080`                               |
//! | `PDS_DATABASE_URL`       | `sqlite://data/pizza_delivery.db`    |
//! | `PDS_JWT_SECRET`         | random (tokens die with the process) |
//! | `PDS_TOKEN_EXPIRY_HOURS` | `1`                                  |

use std::env;

use chrono::Duration;
use log::{error, warn};
use pdm_common::Secret;
use rand::Rng;

use crate::errors::ServerError;

pub const DEFAULT_PDS_HOST: &str = "127.0.0.1";
pub const DEFAULT_PDS_PORT: u16 = 8080;

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub auth: AuthConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_PDS_HOST.into(),
            port: DEFAULT_PDS_PORT,
            database_url: pizza_delivery_engine::db_url(),
            auth: AuthConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16, database_url: &str, auth: AuthConfig) -> Self {
        Self { host: host.into(), port, database_url: database_url.into(), auth }
    }

    pub fn from_env_or_default() -> Self {
        let host = env::var("PDS_HOST").unwrap_or_else(|_| {
            error!("🪛️ PDS_HOST is not set. Using the default, {DEFAULT_PDS_HOST}.");
            DEFAULT_PDS_HOST.into()
        });
        let port = env::var("PDS_PORT")
            .map_err(|e| e.to_string())
            .and_then(|s| s.parse::<u16>().map_err(|e| e.to_string()))
            .unwrap_or_else(|e| {
                error!("🪛️ PDS_PORT is not set or is invalid ({e}). Using the default, {DEFAULT_PDS_PORT}.");
                DEFAULT_PDS_PORT
            });
        let database_url = env::var("PDS_DATABASE_URL").unwrap_or_else(|_| {
            let url = pizza_delivery_engine::db_url();
            error!("🪛️ PDS_DATABASE_URL is not set. Using the default, {url}.");
            url
        });
        let auth = AuthConfig::from_env_or_default();
        Self { host, port, database_url, auth }
    }
}

/// JWT signing configuration. The secret signs every access token the server issues, so losing it
/// (or restarting with a random one) invalidates every outstanding session.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: Secret<String>,
    pub token_expiry: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        warn!(
            "🚨️🚨️🚨️ No JWT secret is configured. A random one will be used for this session, which means that \
             every issued token becomes invalid when the server restarts. Set PDS_JWT_SECRET in production. 🚨️🚨️🚨️"
        );
        let mut rng = rand::thread_rng();
        let key: [u8; 32] = rng.gen();
        let jwt_secret = key.iter().map(|b| format!("{b:02x}")).collect::<String>();
        Self { jwt_secret: Secret::new(jwt_secret), token_expiry: Duration::hours(1) }
    }
}

impl AuthConfig {
    pub fn try_from_env() -> Result<Self, ServerError> {
        let jwt_secret = env::var("PDS_JWT_SECRET")
            .map(Secret::new)
            .map_err(|_| ServerError::ConfigurationError("PDS_JWT_SECRET is not set".into()))?;
        let hours = env::var("PDS_TOKEN_EXPIRY_HOURS").ok().and_then(|v| v.parse::<i64>().ok()).unwrap_or(1);
        Ok(Self { jwt_secret, token_expiry: Duration::hours(hours) })
    }

    pub fn from_env_or_default() -> Self {
        Self::try_from_env().unwrap_or_default()
    }
}
