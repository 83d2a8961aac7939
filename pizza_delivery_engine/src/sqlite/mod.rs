//! SQLite backend for the pizza delivery engine.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
