//! `PostgreSQL` record store for the RSVP backend.
//!
//! This crate provides [`PostgresRecordStore`], the production implementation
//! of the `RecordStore` trait from `rsvp-core`, plus [`migrate`] to bootstrap
//! the `events` and `guests` tables.
//!
//! Every statement is parameterized. Driver failures are classified by
//! SQLSTATE so the service can react to a missing column or a unique
//! violation without looking at message text.
//!
//! # Example
//!
//! ```ignore
//! use rsvp_postgres::{PostgresRecordStore, migrate};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = PostgresRecordStore::new("postgres://localhost/rsvp").await?;
//!     migrate(store.pool()).await?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod schema;
mod store;

pub use error::classify;
pub use schema::migrate;
pub use store::PostgresRecordStore;
