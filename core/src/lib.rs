//! # RSVP Core
//!
//! Domain types and decision logic for the event/RSVP backend.
//!
//! This crate has no I/O of its own. Storage is reached through the
//! [`store::RecordStore`] trait, and every operation the HTTP surface exposes
//! is a method on [`service::RsvpService`].
//!
//! ## Modules
//!
//! - [`validation`]: email heuristic, display truncation, blank handling
//! - [`event`] / [`guest`]: persisted rows, request bodies, responses
//! - [`filter`]: guest search compiled to ordered SQL predicates
//! - [`store`]: the storage boundary
//! - [`service`]: catalog, admission and guest search over a store
//!
//! ## Example
//!
//! ```ignore
//! use rsvp_core::service::RsvpService;
//! use rsvp_core::guest::RsvpSubmission;
//! use rsvp_core::event::EventId;
//!
//! let service = RsvpService::new(store);
//! service.submit_rsvp(EventId::new(1), RsvpSubmission {
//!     name: "Jo".into(),
//!     email: "jo@example.com".into(),
//!     rsvp_status: "maybe".into(), // stored as `pending`
//!     ..Default::default()
//! }).await?;
//! ```

#![forbid(unsafe_code)]

// Re-export commonly used types
pub use chrono::{DateTime, Utc};

pub mod admission;
pub mod catalog;
pub mod event;
pub mod filter;
pub mod guest;
pub mod service;
pub mod store;
pub mod timestamp;
pub mod validation;

pub use event::{CreateEvent, CreatedEvent, Event, EventId, EventRecord, NewEvent};
pub use filter::{GuestFilter, GuestPredicate, GuestQuery};
pub use guest::{CreateGuest, Guest, GuestId, GuestStatus, NewGuest, RsvpConfirmation, RsvpSubmission};
pub use service::{RsvpService, ServiceError};
pub use store::{RecordStore, StoreError, StoreFuture};

/// Environment module - injected dependencies
///
/// Anything nondeterministic that a store implementation needs is abstracted
/// here so tests can pin it.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```
    /// use rsvp_core::environment::Clock;
    /// use rsvp_core::{DateTime, Utc};
    ///
    /// struct Frozen(DateTime<Utc>);
    ///
    /// impl Clock for Frozen {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.0
    ///     }
    /// }
    ///
    /// let at = Utc::now();
    /// assert_eq!(Frozen(at).now(), at);
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }
}
