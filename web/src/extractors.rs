//! Custom Axum extractors.
//!
//! This module contains the extractors the RSVP handlers rely on:
//! - `ApiJson`: JSON body whose rejection is a 400 `{"error":"Invalid JSON"}`
//! - `EventIdPath` / `GuestIdPath`: strictly positive numeric path identifiers
//! - `CorrelationId`: the request correlation ID
//!
//! # Examples
//!
//! ```ignore
//! use rsvp_web::extractors::{ApiJson, EventIdPath};
//!
//! async fn submit_rsvp(
//!     State(state): State<AppState>,
//!     EventIdPath(event_id): EventIdPath,
//!     ApiJson(body): ApiJson<RsvpSubmission>,
//! ) -> Result<(StatusCode, Json<RsvpConfirmation>), AppError> {
//!     // ...
//! }
//! ```

use crate::error::AppError;
use crate::middleware::CORRELATION_ID_HEADER;
use axum::{
    Json, async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{HeaderMap, request::Parts},
};
use rsvp_core::validation::parse_positive_id;
use rsvp_core::{EventId, GuestId};
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Message for any body that does not decode into the expected shape.
pub const INVALID_JSON: &str = "Invalid JSON";

/// JSON request body.
///
/// Behaves like [`axum::Json`] but rejects malformed syntax, wrong field
/// types and a missing content type uniformly with a 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(reason = %rejection.body_text(), "Rejected request body");
                Err(AppError::bad_request(INVALID_JSON))
            }
        }
    }
}

/// Event identifier from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct EventIdPath(pub EventId);

#[async_trait]
impl<S> FromRequestParts<S> for EventIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = positive_path_id(parts, state, "Invalid event ID").await?;
        Ok(Self(EventId::new(id)))
    }
}

/// Guest identifier from the `{id}` path segment.
#[derive(Debug, Clone, Copy)]
pub struct GuestIdPath(pub GuestId);

#[async_trait]
impl<S> FromRequestParts<S> for GuestIdPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let id = positive_path_id(parts, state, "Invalid guest ID").await?;
        Ok(Self(GuestId::new(id)))
    }
}

async fn positive_path_id<S>(
    parts: &mut Parts,
    state: &S,
    message: &'static str,
) -> Result<i64, AppError>
where
    S: Send + Sync,
{
    let Path(raw) = Path::<String>::from_request_parts(parts, state)
        .await
        .map_err(|_| AppError::bad_request(message))?;

    parse_positive_id(&raw).ok_or_else(|| AppError::bad_request(message))
}

/// Correlation ID for request tracing.
///
/// Uses the ID the correlation middleware stored for this request. Without the
/// middleware it falls back to the `X-Correlation-ID` header, or a new UUID v4.
///
/// # Example
///
/// ```ignore
/// async fn handler(correlation_id: CorrelationId) -> String {
///     format!("Request ID: {}", correlation_id.0)
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CorrelationId(pub Uuid);

impl CorrelationId {
    /// Read the ID from `headers`, or generate one when absent or not a UUID.
    #[must_use]
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(CORRELATION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| Uuid::parse_str(s).ok())
            .unwrap_or_else(Uuid::new_v4);
        Self(id)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CorrelationId
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<Self>()
            .copied()
            .unwrap_or_else(|| Self::from_headers(&parts.headers)))
    }
}
