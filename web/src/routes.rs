//! Router configuration.

use crate::handlers::{events, guests, health_check, readiness_check};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Prefix the API routes are nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Build the complete Axum router.
///
/// - `GET /health`, `GET /ready`
/// - `GET|POST /api/v1/events`
/// - `POST /api/v1/events/:id/rsvps`
/// - `GET|POST /api/v1/guests`
/// - `DELETE /api/v1/guests/:id`
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/events", get(events::list_events).post(events::create_event))
        .route("/events/:id/rsvps", post(events::submit_rsvp))
        .route("/guests", get(guests::list_guests).post(guests::create_guest))
        .route("/guests/:id", delete(guests::delete_guest));

    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .nest(API_PREFIX, api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(correlation_id_layer())
        .with_state(state)
}
