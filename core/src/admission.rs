//! Guest admission: RSVP submission and admin guest creation.
//!
//! RSVP is at-most-once per (event, email). The duplicate check followed by
//! the insert is not atomic in application code; the `guests_event_email_key`
//! unique index closes that race, and a violation it reports is mapped to the
//! same conflict as the explicit check.

use crate::event::EventId;
use crate::guest::{CreateGuest, Guest, GuestStatus, NewGuest, RsvpConfirmation, RsvpSubmission};
use crate::service::{RsvpService, ServiceError};
use crate::store::StoreError;
use crate::validation::{is_valid_email, non_blank};

/// Conflict message for a repeated RSVP.
pub const DUPLICATE_RSVP: &str = "You already RSVP'd to this event";

impl RsvpService {
    /// Record a guest's RSVP to `event_id`.
    ///
    /// Steps, each of which may end the request:
    ///
    /// 1. name and email must be present and the email well-formed
    /// 2. the free-form status narrows to [`GuestStatus`]
    /// 3. an existing (event, email) guest is a conflict; if the store has no
    ///    event association the check widens to the email alone
    /// 4. exactly one guest row is inserted
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`] for missing or malformed fields
    /// - [`ServiceError::Duplicate`] when the guest already responded
    /// - [`ServiceError::Storage`] when the check or the insert fails
    pub async fn submit_rsvp(
        &self,
        event_id: EventId,
        submission: RsvpSubmission,
    ) -> Result<RsvpConfirmation, ServiceError> {
        let (name, email) = validate_contact(&submission.name, &submission.email)?;
        let status = GuestStatus::from_client(&submission.rsvp_status);

        if self.already_responded(event_id, &email).await? {
            tracing::info!(event_id = %event_id, "Duplicate RSVP rejected");
            return Err(ServiceError::Duplicate(DUPLICATE_RSVP.to_string()));
        }

        let guest = NewGuest {
            event_id: Some(event_id),
            name,
            email,
            phone: non_blank(submission.phone.as_deref()),
            status,
            notes: non_blank(submission.notes.as_deref()),
            plus_ones: submission.plus_ones,
            dietary_restrictions: non_blank(submission.dietary_restrictions.as_deref()),
        };

        match self.store.insert_guest(guest).await {
            Ok(stored) => {
                tracing::info!(event_id = %event_id, guest_id = %stored.id, status = %stored.status, "RSVP saved");
                Ok(RsvpConfirmation::default())
            }
            Err(StoreError::UniqueViolation(detail)) => {
                tracing::info!(event_id = %event_id, detail = %detail, "Concurrent duplicate RSVP rejected");
                Err(ServiceError::Duplicate(DUPLICATE_RSVP.to_string()))
            }
            Err(e) => Err(ServiceError::storage("Failed to save RSVP", e)),
        }
    }

    /// Create a guest from the admin panel. No event is attached and no
    /// duplicate check is made.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`] for missing or malformed fields
    /// - [`ServiceError::Storage`] when the insert fails
    pub async fn create_guest(&self, input: CreateGuest) -> Result<Guest, ServiceError> {
        let (name, email) = validate_contact(&input.name, &input.email)?;

        let guest = NewGuest {
            event_id: None,
            name,
            email,
            phone: non_blank(input.phone.as_deref()),
            status: GuestStatus::from_client(&input.status),
            notes: None,
            plus_ones: 0,
            dietary_restrictions: None,
        };

        let stored = self
            .store
            .insert_guest(guest)
            .await
            .map_err(|e| ServiceError::storage("Failed to create guest", e))?;

        tracing::info!(guest_id = %stored.id, "Guest created");
        Ok(stored)
    }

    /// Duplicate check scoped to the event, widened to the email alone when
    /// the store reports that guests carry no event association.
    ///
    /// The widened check is a compatibility path for legacy schemas; it
    /// enforces global email uniqueness instead of per-event uniqueness.
    async fn already_responded(&self, event_id: EventId, email: &str) -> Result<bool, ServiceError> {
        match self.store.guest_exists_for_event(event_id, email).await {
            Ok(exists) => Ok(exists),
            Err(StoreError::SchemaMismatch(detail)) => {
                tracing::warn!(
                    event_id = %event_id,
                    detail = %detail,
                    "Guests have no event association, checking email globally"
                );
                self.store
                    .guest_exists(email)
                    .await
                    .map_err(|e| ServiceError::storage("Database error", e))
            }
            Err(e) => Err(ServiceError::storage("Database error", e)),
        }
    }
}

/// Require a name and a well-formed email.
///
/// Both are checked and kept exactly as submitted: whitespace counts as
/// content, so `"  "` is a name and `"a@b.c "` passes the email heuristic.
///
/// # Errors
///
/// [`ServiceError::InvalidInput`] naming the violated rule.
pub fn validate_contact(name: &str, email: &str) -> Result<(String, String), ServiceError> {
    if name.is_empty() || email.is_empty() {
        return Err(ServiceError::invalid("Name and email required"));
    }
    if !is_valid_email(email) {
        return Err(ServiceError::invalid("Invalid email format"));
    }

    Ok((name.to_string(), email.to_string()))
}
