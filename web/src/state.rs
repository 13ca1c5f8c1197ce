//! Application state for Axum handlers.

use rsvp_core::{RecordStore, RsvpService};
use std::sync::Arc;

/// Application state shared across all HTTP handlers.
///
/// # Examples
///
/// ```ignore
/// use axum::extract::State;
/// use rsvp_web::{AppError, AppState};
///
/// async fn handler(State(state): State<AppState>) -> Result<Json<Vec<Event>>, AppError> {
///     Ok(Json(state.service.list_events().await?))
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AppState {
    /// Event and guest operations
    pub service: RsvpService,
}

impl AppState {
    /// Create state over an existing service.
    #[must_use]
    pub const fn new(service: RsvpService) -> Self {
        Self { service }
    }

    /// Create state over a record store.
    #[must_use]
    pub fn from_store(store: Arc<dyn RecordStore>) -> Self {
        Self::new(RsvpService::new(store))
    }
}
