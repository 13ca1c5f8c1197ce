//! `RecordStore` over a `PgPool`.

use crate::error::classify;
use chrono::{DateTime, Utc};
use rsvp_core::event::{EventId, EventRecord, NewEvent};
use rsvp_core::filter::{GUEST_SELECT, GuestQuery};
use rsvp_core::guest::{Guest, GuestId, GuestStatus, NewGuest};
use rsvp_core::store::{RecordStore, StoreError, StoreFuture};
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

/// PostgreSQL-backed record store.
///
/// Cloning is cheap; clones share the connection pool.
///
/// # Example
///
/// ```no_run
/// use rsvp_postgres::PostgresRecordStore;
///
/// # async fn example(pool: sqlx::PgPool) {
/// let store = PostgresRecordStore::from_pool(pool);
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Connect to `database_url` with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Database`] if the connection cannot be established.
    pub async fn new(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPool::connect(database_url)
            .await
            .map_err(|e| StoreError::Database(format!("Failed to connect: {e}")))?;
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    #[must_use]
    pub const fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_events(&self) -> Result<Vec<EventRecord>, StoreError> {
        let rows = sqlx::query(
            r"
            SELECT id, title, description, event_date, location, created_at
            FROM events
            ORDER BY id
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify(&e))?;

        rows.iter().map(row_to_event).collect()
    }

    async fn fetch_guest_exists_for_event(
        &self,
        event_id: EventId,
        email: &str,
    ) -> Result<bool, StoreError> {
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM guests WHERE event_id = $1 AND email = $2)",
        )
        .bind(event_id.get())
        .bind(email)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(exists) => Ok(exists),
            Err(e) => {
                let error = classify(&e);
                if matches!(error, StoreError::SchemaMismatch(_)) {
                    metrics::counter!("rsvp.store.schema_fallback").increment(1);
                }
                Err(error)
            }
        }
    }

    async fn write_event(&self, event: NewEvent) -> Result<EventId, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r"
            INSERT INTO events (title, description, event_date, location)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            ",
        )
        .bind(&event.title)
        .bind(event.description.as_deref())
        .bind(event.event_date)
        .bind(event.location.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify(&e))?;

        metrics::counter!("rsvp.events.inserted").increment(1);
        Ok(EventId::new(id))
    }

    async fn write_guest(&self, guest: NewGuest) -> Result<Guest, StoreError> {
        let result = sqlx::query(
            r"
            INSERT INTO guests (
                event_id, name, email, phone, status,
                notes, plus_ones, dietary_restrictions
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, email, phone, status, created_at
            ",
        )
        .bind(guest.event_id.map(EventId::get))
        .bind(&guest.name)
        .bind(&guest.email)
        .bind(guest.phone.as_deref())
        .bind(guest.status.as_str())
        .bind(guest.notes.as_deref())
        .bind(guest.plus_ones)
        .bind(guest.dietary_restrictions.as_deref())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => {
                metrics::counter!("rsvp.guests.inserted", "status" => guest.status.as_str())
                    .increment(1);
                row_to_guest(&row)
            }
            Err(e) => {
                let error = classify(&e);
                if matches!(error, StoreError::UniqueViolation(_)) {
                    metrics::counter!("rsvp.guests.duplicate").increment(1);
                }
                Err(error)
            }
        }
    }

    async fn fetch_guests(&self, query: &GuestQuery) -> Result<Vec<Guest>, StoreError> {
        let compiled = query.to_sql();
        tracing::debug!(sql = %compiled.sql, params = compiled.params.len(), "Listing guests");

        let mut statement = sqlx::query(&compiled.sql);
        for param in &compiled.params {
            statement = statement.bind(param.as_str());
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .map_err(|e| classify(&e))?;

        rows.iter().map(row_to_guest).collect()
    }
}

impl RecordStore for PostgresRecordStore {
    fn ping(&self) -> StoreFuture<'_, ()> {
        Box::pin(async move {
            sqlx::query("SELECT 1")
                .execute(&self.pool)
                .await
                .map_err(|e| classify(&e))?;
            Ok(())
        })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>> {
        Box::pin(self.fetch_events())
    }

    fn count_rsvps(&self, event_id: EventId) -> StoreFuture<'_, i64> {
        Box::pin(async move {
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM guests WHERE event_id = $1")
                .bind(event_id.get())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify(&e))
        })
    }

    fn insert_event(&self, event: NewEvent) -> StoreFuture<'_, EventId> {
        Box::pin(self.write_event(event))
    }

    fn guest_exists_for_event<'a>(
        &'a self,
        event_id: EventId,
        email: &'a str,
    ) -> StoreFuture<'a, bool> {
        Box::pin(self.fetch_guest_exists_for_event(event_id, email))
    }

    fn guest_exists<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool> {
        Box::pin(async move {
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM guests WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| classify(&e))
        })
    }

    fn insert_guest(&self, guest: NewGuest) -> StoreFuture<'_, Guest> {
        Box::pin(self.write_guest(guest))
    }

    fn list_guests<'a>(&'a self, query: &'a GuestQuery) -> StoreFuture<'a, Vec<Guest>> {
        Box::pin(self.fetch_guests(query))
    }

    fn delete_guest(&self, id: GuestId) -> StoreFuture<'_, u64> {
        Box::pin(async move {
            let result = sqlx::query("DELETE FROM guests WHERE id = $1")
                .bind(id.get())
                .execute(&self.pool)
                .await
                .map_err(|e| classify(&e))?;
            Ok(result.rows_affected())
        })
    }
}

/// Convert an `events` row to an [`EventRecord`].
fn row_to_event(row: &PgRow) -> Result<EventRecord, StoreError> {
    let created_at: Option<DateTime<Utc>> = row.try_get("created_at").map_err(|e| classify(&e))?;

    Ok(EventRecord {
        id: EventId::new(row.try_get("id").map_err(|e| classify(&e))?),
        title: row.try_get("title").map_err(|e| classify(&e))?,
        description: row.try_get("description").map_err(|e| classify(&e))?,
        event_date: row.try_get("event_date").map_err(|e| classify(&e))?,
        location: row.try_get("location").map_err(|e| classify(&e))?,
        created_at,
    })
}

/// Convert a guest listing row (see [`GUEST_SELECT`]) to a [`Guest`].
fn row_to_guest(row: &PgRow) -> Result<Guest, StoreError> {
    let status: String = row.try_get("status").map_err(|e| classify(&e))?;
    let status = GuestStatus::parse(&status).map_err(|e| StoreError::Decode(e.to_string()))?;

    Ok(Guest {
        id: GuestId::new(row.try_get("id").map_err(|e| classify(&e))?),
        name: row.try_get("name").map_err(|e| classify(&e))?,
        email: row.try_get("email").map_err(|e| classify(&e))?,
        phone: row.try_get("phone").map_err(|e| classify(&e))?,
        status,
        created_at: row.try_get("created_at").map_err(|e| classify(&e))?,
    })
}
