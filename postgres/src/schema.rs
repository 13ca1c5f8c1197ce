//! Schema bootstrap.

use crate::error::classify;
use rsvp_core::StoreError;
use sqlx::PgPool;

const STATEMENTS: [&str; 3] = [
    r"
    CREATE TABLE IF NOT EXISTS events (
        id BIGSERIAL PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        event_date TIMESTAMPTZ,
        location TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS guests (
        id BIGSERIAL PRIMARY KEY,
        event_id BIGINT REFERENCES events(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        email TEXT NOT NULL,
        phone TEXT,
        status TEXT NOT NULL DEFAULT 'pending'
            CHECK (status IN ('attending', 'pending', 'declined')),
        notes TEXT,
        plus_ones INTEGER NOT NULL DEFAULT 0,
        dietary_restrictions TEXT,
        created_at TIMESTAMPTZ NOT NULL DEFAULT now()
    )
    ",
    "CREATE UNIQUE INDEX IF NOT EXISTS guests_event_email_key ON guests(event_id, email)",
];

/// Create the `events` and `guests` tables and the RSVP uniqueness index.
///
/// Safe to run on every startup.
///
/// # Errors
///
/// Returns [`StoreError`] if a statement fails. Against a legacy `guests`
/// table without `event_id` the index statement fails with
/// [`StoreError::SchemaMismatch`].
pub async fn migrate(pool: &PgPool) -> Result<(), StoreError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| classify(&e))?;
    }

    tracing::info!("Schema is up to date");
    Ok(())
}
