//! The RSVP service: catalog, admission and guest search over a
//! [`RecordStore`].
//!
//! The service holds no mutable state of its own. Each call is at most a
//! handful of store round-trips and either succeeds or fails terminally;
//! there are no retries.
//!
//! # Error classes
//!
//! | Variant | Meaning | HTTP |
//! |---|---|---|
//! | [`ServiceError::InvalidInput`] | Client sent something unusable | 400 |
//! | [`ServiceError::Duplicate`] | RSVP already exists | 409 |
//! | [`ServiceError::Storage`] | Store failed; detail is for logs only | 500 |

use crate::filter::{GuestFilter, GuestQuery};
use crate::guest::{Guest, GuestId};
use crate::store::{RecordStore, StoreError};
use std::sync::Arc;
use thiserror::Error;

/// Errors returned by [`RsvpService`] operations.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The request violates an input rule. The message is safe to show.
    #[error("{0}")]
    InvalidInput(String),

    /// The guest already responded to this event.
    #[error("{0}")]
    Duplicate(String),

    /// The store failed. `message` is generic; `source` is never shown to
    /// clients.
    #[error("{message}: {source}")]
    Storage {
        /// Client-facing summary
        message: &'static str,
        /// Underlying store failure
        source: StoreError,
    },
}

impl ServiceError {
    /// Shorthand for [`ServiceError::InvalidInput`].
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Wrap a store failure under a client-facing summary.
    #[must_use]
    pub const fn storage(message: &'static str, source: StoreError) -> Self {
        Self::Storage { message, source }
    }

    /// The message a client may see.
    #[must_use]
    pub fn public_message(&self) -> &str {
        match self {
            Self::InvalidInput(message) | Self::Duplicate(message) => message.as_str(),
            Self::Storage { message, .. } => *message,
        }
    }
}

/// Entry point for every event and guest operation.
#[derive(Clone)]
pub struct RsvpService {
    pub(crate) store: Arc<dyn RecordStore>,
}

impl RsvpService {
    /// Create a service over `store`.
    #[must_use]
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    #[must_use]
    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// List guests, optionally filtered by status and a name/email search.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Storage`] when the query fails.
    pub async fn list_guests(&self, filter: &GuestFilter) -> Result<Vec<Guest>, ServiceError> {
        let query = GuestQuery::from_filter(filter);
        self.store
            .list_guests(&query)
            .await
            .map_err(|e| ServiceError::storage("Failed to load guests", e))
    }

    /// Delete a guest. Deleting an unknown identifier is not an error.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Storage`] when the delete fails.
    pub async fn delete_guest(&self, id: GuestId) -> Result<(), ServiceError> {
        let removed = self
            .store
            .delete_guest(id)
            .await
            .map_err(|e| ServiceError::storage("Failed to delete guest", e))?;

        tracing::info!(guest_id = %id, removed, "Guest deleted");
        Ok(())
    }
}

impl std::fmt::Debug for RsvpService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RsvpService").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_error_hides_source_from_public_message() {
        let err = ServiceError::storage(
            "Failed to load guests",
            StoreError::Database("connection refused".to_string()),
        );
        assert_eq!(err.public_message(), "Failed to load guests");
        assert_eq!(
            err.to_string(),
            "Failed to load guests: Database error: connection refused"
        );
    }

    #[test]
    fn invalid_input_message_is_public() {
        let err = ServiceError::invalid("Invalid email format");
        assert_eq!(err.public_message(), "Invalid email format");
    }
}
