//! Guest and RSVP types.

use crate::event::EventId;
use crate::timestamp;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Store-assigned guest identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuestId(i64);

impl GuestId {
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

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Attendance status. A closed set: the store rejects anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuestStatus {
    /// Confirmed attendance
    Attending,
    /// No answer yet, or an undecided answer
    #[default]
    Pending,
    /// Will not attend
    Declined,
}

/// A status string read from storage that is outside the closed set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid guest status: {0}")]
pub struct InvalidStatus(pub String);

impl GuestStatus {
    /// Storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Attending => "attending",
            Self::Pending => "pending",
            Self::Declined => "declined",
        }
    }

    /// Strict parse of a stored status.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidStatus`] for any value outside the closed set.
    pub fn parse(s: &str) -> Result<Self, InvalidStatus> {
        match s {
            "attending" => Ok(Self::Attending),
            "pending" => Ok(Self::Pending),
            "declined" => Ok(Self::Declined),
            other => Err(InvalidStatus(other.to_string())),
        }
    }

    /// Map free-form client input onto the closed set.
    ///
    /// `attending` and `declined` pass through; everything else, including
    /// `maybe` and the empty string, narrows to `pending`.
    #[must_use]
    pub fn from_client(input: &str) -> Self {
        match input {
            "attending" => Self::Attending,
            "declined" => Self::Declined,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for GuestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A guest row as listed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Guest {
    /// Identifier
    pub id: GuestId,
    /// Display name
    pub name: String,
    /// Contact address, also the per-event dedup key
    pub email: String,
    /// Phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Attendance status
    pub status: GuestStatus,
    /// When the row was inserted
    #[serde(serialize_with = "timestamp::serialize")]
    pub created_at: DateTime<Utc>,
}

/// RSVP request body for `POST /events/{id}/rsvps`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RsvpSubmission {
    /// Guest name, required
    pub name: String,
    /// Guest email, required and format-checked
    pub email: String,
    /// Optional phone
    pub phone: Option<String>,
    /// Free-form status, see [`GuestStatus::from_client`]
    pub rsvp_status: String,
    /// Optional notes
    pub notes: Option<String>,
    /// Additional attendees
    pub plus_ones: i32,
    /// Optional dietary restrictions
    pub dietary_restrictions: Option<String>,
}

/// Admin request body for `POST /guests`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateGuest {
    /// Guest name, required
    pub name: String,
    /// Guest email, required and format-checked
    pub email: String,
    /// Optional phone
    pub phone: Option<String>,
    /// Free-form status, see [`GuestStatus::from_client`]
    pub status: String,
}

/// A validated guest ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGuest {
    /// Event this guest responded to; `None` for admin-created guests
    pub event_id: Option<EventId>,
    /// Display name
    pub name: String,
    /// Contact address
    pub email: String,
    /// Phone, `None` when blank
    pub phone: Option<String>,
    /// Normalized status
    pub status: GuestStatus,
    /// RSVP notes, `None` when blank
    pub notes: Option<String>,
    /// Additional attendees
    pub plus_ones: i32,
    /// Dietary restrictions, `None` when blank
    pub dietary_restrictions: Option<String>,
}

/// Body returned after a successful RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RsvpConfirmation {
    /// Confirmation message
    pub message: String,
}

impl RsvpConfirmation {
    /// Confirmation message for a saved RSVP.
    pub const MESSAGE: &'static str = "RSVP saved!";
}

impl Default for RsvpConfirmation {
    fn default() -> Self {
        Self {
            message: Self::MESSAGE.to_string(),
        }
    }
}
