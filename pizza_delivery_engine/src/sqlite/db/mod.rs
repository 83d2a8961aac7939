//! # SQLite database methods
//!
//! "Low-level" SQLite interactions. Everything here is a plain function taking a
//! `&mut SqliteConnection`, so callers can hand in a pooled connection or a transaction without
//! any other changes.
use std::env;

use log::info;
use sqlx::{sqlite::SqlitePoolOptions, Error as SqlxError, SqlitePool};

pub mod couriers;
pub mod customers;
pub mod establishments;
pub mod flavors;
pub mod notifications;
pub mod orders;

const SQLITE_DB_URL: &str = "sqlite://data/pizza_delivery.db";

pub fn db_url() -> String {
    let result = env::var("PDS_DATABASE_URL").unwrap_or_else(|_| {
        info!("PDS_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}

/// Brings the schema up to date using the migrations embedded at compile time.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqlxError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("🗃️ Database migrations are up to date");
    Ok(())
}
