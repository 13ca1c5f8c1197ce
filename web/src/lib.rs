//! HTTP surface for the RSVP backend.
//!
//! Handlers stay thin: extract, call [`rsvp_core::RsvpService`], and map the
//! result to a response. All decision logic lives in `rsvp-core`.
//!
//! # Request Flow
//!
//! 1. **Correlation ID** resolved and a request span opened
//! 2. **Extract** path IDs and JSON bodies (400 on bad input)
//! 3. **Call** the service
//! 4. **Map** `ServiceError` to a status and `{"error": ...}` body
//!
//! # Example
//!
//! ```ignore
//! use rsvp_web::{AppState, build_router};
//!
//! let app = build_router(AppState::from_store(store));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{ApiJson, CorrelationId, EventIdPath, GuestIdPath};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::{API_PREFIX, build_router};
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
