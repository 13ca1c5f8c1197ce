//! Record store abstraction.
//!
//! The admission and catalog logic only talks to storage through
//! [`RecordStore`]. Two implementations exist:
//!
//! - `PostgresRecordStore` (in `rsvp-postgres`): production storage
//! - `InMemoryRecordStore` (in `rsvp-testing`): deterministic tests with
//!   fault injection
//!
//! # Dyn Compatibility
//!
//! Methods return `Pin<Box<dyn Future>>` instead of using `async fn` so the
//! store can be shared as `Arc<dyn RecordStore>` across handlers.

use crate::event::{EventId, EventRecord, NewEvent};
use crate::filter::GuestQuery;
use crate::guest::{Guest, GuestId, NewGuest};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future returned by [`RecordStore`] methods.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + Send + 'a>>;

/// Errors surfaced by a record store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The statement referenced a column or table the schema does not have.
    ///
    /// Distinguished from other failures so callers can fall back to a query
    /// that avoids the missing structure.
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    /// A unique constraint rejected the write.
    #[error("Unique violation: {0}")]
    UniqueViolation(String),

    /// Connection, query or constraint failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A row could not be shaped into a domain value.
    #[error("Decode error: {0}")]
    Decode(String),
}

/// Parameterized access to the events and guests relations.
pub trait RecordStore: Send + Sync {
    /// Cheap connectivity probe used by readiness checks.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] when the store is unreachable.
    fn ping(&self) -> StoreFuture<'_, ()>;

    /// All events, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`]; a row that fails to decode aborts the listing.
    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>>;

    /// Number of guests associated with `event_id`.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`].
    fn count_rsvps(&self, event_id: EventId) -> StoreFuture<'_, i64>;

    /// Insert an event and return its identifier.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`].
    fn insert_event(&self, event: NewEvent) -> StoreFuture<'_, EventId>;

    /// Whether a guest with `email` already responded to `event_id`.
    ///
    /// # Errors
    ///
    /// [`StoreError::SchemaMismatch`] when guests carry no event association.
    fn guest_exists_for_event<'a>(
        &'a self,
        event_id: EventId,
        email: &'a str,
    ) -> StoreFuture<'a, bool>;

    /// Whether any guest, for any event, uses `email`.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`].
    fn guest_exists<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool>;

    /// Insert a guest and return the stored row.
    ///
    /// # Errors
    ///
    /// [`StoreError::UniqueViolation`] when the (event, email) pair exists.
    fn insert_guest(&self, guest: NewGuest) -> StoreFuture<'_, Guest>;

    /// Guests matching `query`, ordered by identifier.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`].
    fn list_guests<'a>(&'a self, query: &'a GuestQuery) -> StoreFuture<'a, Vec<Guest>>;

    /// Delete a guest. Returns the number of rows removed.
    ///
    /// # Errors
    ///
    /// Any [`StoreError`].
    fn delete_guest(&self, id: GuestId) -> StoreFuture<'_, u64>;
}
