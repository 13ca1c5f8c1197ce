//! Wire format for timestamps.
//!
//! Every timestamp that crosses the HTTP boundary is RFC 3339 in UTC with
//! whole seconds, e.g. `2025-08-20T18:00:00Z`. Parsing accepts any RFC 3339
//! offset and normalizes to UTC.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

/// Example shown to clients when a date fails to parse.
pub const EXAMPLE: &str = "2025-08-20T18:00:00Z";

/// Format a timestamp in the wire format.
#[must_use]
pub fn format(at: &DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a client-supplied RFC 3339 timestamp.
///
/// # Errors
///
/// Returns the underlying [`chrono::ParseError`] when `input` is not RFC 3339,
/// including when it carries surrounding whitespace.
pub fn parse(input: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(input).map(|at| at.with_timezone(&Utc))
}

/// `serialize_with` helper for required timestamps.
///
/// # Errors
///
/// Propagates serializer errors.
pub fn serialize<S: Serializer>(at: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format(at))
}

/// `serialize_with` helper for optional timestamps.
///
/// Pair with `skip_serializing_if = "Option::is_none"` so that an absent
/// value omits the field entirely.
///
/// # Errors
///
/// Propagates serializer errors.
#[allow(clippy::ref_option)]
pub fn serialize_option<S: Serializer>(
    at: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => serializer.serialize_str(&format(at)),
        None => serializer.serialize_none(),
    }
}
