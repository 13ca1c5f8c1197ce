//! Guest administration handlers.

use crate::WebResult;
use crate::extractors::{ApiJson, GuestIdPath};
use crate::state::AppState;
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use rsvp_core::{CreateGuest, Guest, GuestFilter};

/// List guests, optionally filtered.
///
/// `GET /api/v1/guests?status=attending&search=jo`
///
/// # Errors
///
/// 500 when the query fails.
pub async fn list_guests(
    State(state): State<AppState>,
    Query(filter): Query<GuestFilter>,
) -> WebResult<Json<Vec<Guest>>> {
    let guests = state.service.list_guests(&filter).await?;
    Ok(Json(guests))
}

/// Create a guest without an event.
///
/// `POST /api/v1/guests`
///
/// # Errors
///
/// 400 for a missing name or malformed email; 500 when the insert fails.
pub async fn create_guest(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateGuest>,
) -> WebResult<(StatusCode, Json<Guest>)> {
    let guest = state.service.create_guest(request).await?;
    Ok((StatusCode::CREATED, Json(guest)))
}

/// Delete a guest. Unknown identifiers still answer 204.
///
/// `DELETE /api/v1/guests/:id`
///
/// # Errors
///
/// 400 for an invalid guest ID; 500 when the delete fails.
pub async fn delete_guest(
    State(state): State<AppState>,
    GuestIdPath(id): GuestIdPath,
) -> WebResult<StatusCode> {
    state.service.delete_guest(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
