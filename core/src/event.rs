//! Event catalog types.
//!
//! An [`EventRecord`] is what the store persists. An [`Event`] is what the
//! listing returns: the record plus two derived, never-persisted fields,
//! `display` and `rsvps`, recomputed on every read.

use crate::timestamp;
use crate::validation::truncate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between display components.
pub const DISPLAY_SEPARATOR: &str = " – ";

/// Maximum title length inside a display string.
pub const DISPLAY_TITLE_MAX: usize = 30;
/// Maximum description length inside a display string.
pub const DISPLAY_DESCRIPTION_MAX: usize = 50;
/// Maximum location length inside a display string.
pub const DISPLAY_LOCATION_MAX: usize = 30;
/// `strftime` format of the date component, e.g. `20 Aug 25`.
pub const DISPLAY_DATE_FORMAT: &str = "%d %b %y";

/// Store-assigned event identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(i64);

impl EventId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw identifier.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted event row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    /// Identifier
    pub id: EventId,
    /// Title, never empty
    pub title: String,
    /// Free-form description
    pub description: Option<String>,
    /// When the event takes place
    pub event_date: Option<DateTime<Utc>>,
    /// Where the event takes place
    pub location: Option<String>,
    /// When the row was inserted
    pub created_at: Option<DateTime<Utc>>,
}

/// An event as returned by the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Free-form description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// When the event takes place
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize_option"
    )]
    pub event_date: Option<DateTime<Utc>>,
    /// Where the event takes place
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// When the row was inserted
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "timestamp::serialize_option"
    )]
    pub created_at: Option<DateTime<Utc>>,
    /// Human-readable one-line summary
    pub display: String,
    /// Number of guest rows associated with this event
    pub rsvps: i64,
}

impl Event {
    /// Attach the derived fields to a stored record.
    #[must_use]
    pub fn from_record(record: EventRecord, rsvps: i64) -> Self {
        let display = compose_display(
            &record.title,
            record.description.as_deref(),
            record.location.as_deref(),
            record.event_date.as_ref(),
        );

        Self {
            id: record.id,
            title: record.title,
            description: record.description,
            event_date: record.event_date,
            location: record.location,
            created_at: record.created_at,
            display,
            rsvps,
        }
    }
}

/// Build the display string for an event.
///
/// Joins the non-empty components among the truncated title, description and
/// location, plus the formatted date, with [`DISPLAY_SEPARATOR`]. Missing or
/// empty components are skipped rather than rendered as blanks.
#[must_use]
pub fn compose_display(
    title: &str,
    description: Option<&str>,
    location: Option<&str>,
    event_date: Option<&DateTime<Utc>>,
) -> String {
    let date = event_date.map(|at| at.format(DISPLAY_DATE_FORMAT).to_string());

    let parts = [
        Some(truncate(title, DISPLAY_TITLE_MAX)),
        description.map(|d| truncate(d, DISPLAY_DESCRIPTION_MAX)),
        location.map(|l| truncate(l, DISPLAY_LOCATION_MAX)),
        date.map(Into::into),
    ];

    parts
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(DISPLAY_SEPARATOR)
}

/// Create-event request body.
///
/// Every field defaults so that a missing key is reported as a validation
/// message instead of a decode failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateEvent {
    /// Title, required
    pub title: String,
    /// Optional description
    pub description: Option<String>,
    /// RFC 3339 timestamp, required
    pub event_date: String,
    /// Optional location
    pub location: Option<String>,
}

/// A validated event ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    /// Title, non-empty
    pub title: String,
    /// Description, `None` when blank
    pub description: Option<String>,
    /// Parsed date
    pub event_date: DateTime<Utc>,
    /// Location, `None` when blank
    pub location: Option<String>,
}

/// Echo returned after creating an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedEvent {
    /// Store-assigned identifier
    pub id: EventId,
    /// Title
    pub title: String,
    /// Description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Normalized date
    #[serde(serialize_with = "timestamp::serialize")]
    pub event_date: DateTime<Utc>,
    /// Location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Confirmation message
    pub message: String,
}

impl CreatedEvent {
    /// Confirmation message for a created event.
    pub const MESSAGE: &'static str = "Event created!";

    /// Echo `event` under the identifier the store assigned.
    #[must_use]
    pub fn new(id: EventId, event: NewEvent) -> Self {
        Self {
            id,
            title: event.title,
            description: event.description,
            event_date: event.event_date,
            location: event.location,
            message: Self::MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record() -> EventRecord {
        EventRecord {
            id: EventId::new(7),
            title: "Summer Party".to_string(),
            description: None,
            event_date: None,
            location: None,
            created_at: None,
        }
    }

    #[test]
    fn display_with_only_title_has_no_separators() {
        let event = Event::from_record(record(), 0);
        assert_eq!(event.display, "Summer Party");
    }

    #[test]
    fn display_joins_all_components_in_order() {
        let at = Utc.with_ymd_and_hms(2025, 8, 20, 18, 0, 0).unwrap();
        let display = compose_display("Gala", Some("Black tie"), Some("Town Hall"), Some(&at));
        assert_eq!(display, "Gala – Black tie – Town Hall – 20 Aug 25");
    }

    #[test]
    fn display_skips_empty_description() {
        let display = compose_display("Gala", Some(""), Some("Town Hall"), None);
        assert_eq!(display, "Gala – Town Hall");
    }

    #[test]
    fn display_truncates_each_component() {
        let title = "A".repeat(40);
        let description = "B".repeat(60);
        let display = compose_display(&title, Some(&description), None, None);
        let parts: Vec<&str> = display.split(DISPLAY_SEPARATOR).collect();
        assert_eq!(parts[0].chars().count(), DISPLAY_TITLE_MAX);
        assert!(parts[0].ends_with("..."));
        assert_eq!(parts[1].chars().count(), DISPLAY_DESCRIPTION_MAX);
    }

    #[test]
    fn absent_fields_are_omitted_from_json() {
        let json = serde_json::to_value(Event::from_record(record(), 3)).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("description"));
        assert!(!object.contains_key("event_date"));
        assert!(!object.contains_key("location"));
        assert!(!object.contains_key("created_at"));
        assert_eq!(json["rsvps"], 3);
        assert_eq!(json["id"], 7);
    }

    #[test]
    fn present_dates_use_wire_format() {
        let mut record = record();
        record.event_date = Some(Utc.with_ymd_and_hms(2025, 8, 20, 18, 0, 0).unwrap());
        let json = serde_json::to_value(Event::from_record(record, 0)).unwrap();
        assert_eq!(json["event_date"], "2025-08-20T18:00:00Z");
    }
}
