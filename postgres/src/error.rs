//! SQLSTATE-based classification of driver errors.

use rsvp_core::StoreError;

/// `undefined_column`
const UNDEFINED_COLUMN: &str = "42703";
/// `undefined_table`
const UNDEFINED_TABLE: &str = "42P01";
/// `unique_violation`
const UNIQUE_VIOLATION: &str = "23505";

/// Map a driver error onto [`StoreError`].
#[must_use]
pub fn classify(error: &sqlx::Error) -> StoreError {
    match error {
        sqlx::Error::Database(db) => from_sqlstate(db.code().as_deref(), db.message()),
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) | sqlx::Error::ColumnNotFound(_) => {
            StoreError::Decode(error.to_string())
        }
        other => StoreError::Database(other.to_string()),
    }
}

pub(crate) fn from_sqlstate(code: Option<&str>, message: &str) -> StoreError {
    match code {
        Some(UNDEFINED_COLUMN | UNDEFINED_TABLE) => StoreError::SchemaMismatch(message.to_string()),
        Some(UNIQUE_VIOLATION) => StoreError::UniqueViolation(message.to_string()),
        _ => StoreError::Database(message.to_string()),
    }
}
