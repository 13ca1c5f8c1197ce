//! Event catalog and RSVP handlers.

use crate::WebResult;
use crate::extractors::{ApiJson, EventIdPath};
use crate::state::AppState;
use axum::{Json, extract::State, http::StatusCode};
use rsvp_core::{CreateEvent, CreatedEvent, Event, RsvpConfirmation, RsvpSubmission};

/// List all events with display string and RSVP count.
///
/// `GET /api/v1/events`
///
/// # Errors
///
/// 500 when the events cannot be loaded.
pub async fn list_events(State(state): State<AppState>) -> WebResult<Json<Vec<Event>>> {
    let events = state.service.list_events().await?;
    Ok(Json(events))
}

/// Create an event.
///
/// `POST /api/v1/events`
///
/// # Errors
///
/// 400 for a missing title or date, or a date that is not RFC 3339; 500 when
/// the insert fails.
pub async fn create_event(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateEvent>,
) -> WebResult<(StatusCode, Json<CreatedEvent>)> {
    let created = state.service.create_event(request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Submit an RSVP for an event.
///
/// `POST /api/v1/events/:id/rsvps`
///
/// # Errors
///
/// - 400 for an invalid event ID, name or email
/// - 409 when this email already responded to the event
/// - 500 when the check or insert fails
pub async fn submit_rsvp(
    State(state): State<AppState>,
    EventIdPath(event_id): EventIdPath,
    ApiJson(submission): ApiJson<RsvpSubmission>,
) -> WebResult<(StatusCode, Json<RsvpConfirmation>)> {
    let confirmation = state.service.submit_rsvp(event_id, submission).await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}
