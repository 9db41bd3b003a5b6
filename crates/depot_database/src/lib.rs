//! PostgreSQL data gateway for depot.
//!
//! This crate provides the diesel schema, row models and the
//! [`PostgresStore`] implementation of the store traits from
//! `depot_interface`.
//!
//! # Example
//!
//! ```rust,ignore
//! use depot_database::{establish_pool, run_migrations, PostgresStore};
//!
//! let pool = establish_pool(&database_url, 8)?;
//! run_migrations(&pool)?;
//! let store = PostgresStore::new(pool);
//! ```

mod connection;
mod conversions;
mod models;
mod store;

pub mod schema;

pub use connection::{establish_pool, run_migrations, PgPool};
pub use conversions::SETTINGS_ID;
pub use store::PostgresStore;

use depot_error::DatabaseError;

/// Result type for database operations.
pub type DatabaseResult<T> = Result<T, DatabaseError>;
