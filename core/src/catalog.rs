//! Event catalog operations.

use crate::event::{CreateEvent, CreatedEvent, Event, NewEvent};
use crate::service::{RsvpService, ServiceError};
use crate::timestamp;
use crate::validation::non_blank;

impl RsvpService {
    /// List every event with its display string and RSVP count.
    ///
    /// Counting is best-effort: if the count for one event fails, that event
    /// reports `rsvps: 0` and the listing continues.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Storage`] when the events themselves cannot be loaded.
    pub async fn list_events(&self) -> Result<Vec<Event>, ServiceError> {
        let records = self
            .store
            .list_events()
            .await
            .map_err(|e| ServiceError::storage("Failed to load events", e))?;

        let mut events = Vec::with_capacity(records.len());
        for record in records {
            let rsvps = match self.store.count_rsvps(record.id).await {
                Ok(count) => count,
                Err(e) => {
                    tracing::warn!(event_id = %record.id, error = %e, "RSVP count failed, reporting zero");
                    0
                }
            };
            events.push(Event::from_record(record, rsvps));
        }

        Ok(events)
    }

    /// Validate and insert a new event.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::InvalidInput`] for a missing title, missing date or a
    ///   date that is not RFC 3339
    /// - [`ServiceError::Storage`] when the insert fails
    pub async fn create_event(&self, input: CreateEvent) -> Result<CreatedEvent, ServiceError> {
        let event = validate_event(input)?;

        let id = self
            .store
            .insert_event(event.clone())
            .await
            .map_err(|e| ServiceError::storage("Failed to create event", e))?;

        tracing::info!(event_id = %id, title = %event.title, "Event created");
        Ok(CreatedEvent::new(id, event))
    }
}

/// Check a create-event request and normalize its optional fields.
///
/// # Errors
///
/// [`ServiceError::InvalidInput`] describing the first violated rule.
pub fn validate_event(input: CreateEvent) -> Result<NewEvent, ServiceError> {
    let title = input.title;
    if title.is_empty() {
        return Err(ServiceError::invalid("Title is required"));
    }

    if input.event_date.is_empty() {
        return Err(ServiceError::invalid("Event date is required"));
    }

    let event_date = timestamp::parse(&input.event_date).map_err(|_| {
        ServiceError::invalid(format!(
            "Invalid date format – use ISO (e.g., {})",
            timestamp::EXAMPLE
        ))
    })?;

    Ok(NewEvent {
        title,
        description: non_blank(input.description.as_deref()),
        event_date,
        location: non_blank(input.location.as_deref()),
    })
}
