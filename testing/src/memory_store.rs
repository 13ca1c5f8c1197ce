//! In-memory `RecordStore` for fast, deterministic tests.
//!
//! Mirrors the Postgres store's observable behavior, including the
//! `(event_id, email)` unique index, and adds switches to inject the
//! failures the service must tolerate.

#![allow(clippy::unwrap_used)] // Test infrastructure uses unwrap on poisoned locks

use crate::mocks::test_clock;
use rsvp_core::environment::Clock;
use rsvp_core::event::{EventId, EventRecord, NewEvent};
use rsvp_core::filter::GuestQuery;
use rsvp_core::guest::{Guest, GuestId, NewGuest};
use rsvp_core::store::{RecordStore, StoreError, StoreFuture};
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, RwLock};

/// A guest row including the RSVP-only columns the listing does not expose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredGuest {
    /// The listed view of the row
    pub guest: Guest,
    /// Associated event, if any
    pub event_id: Option<EventId>,
    /// RSVP notes
    pub notes: Option<String>,
    /// Additional attendees
    pub plus_ones: i32,
    /// Dietary restrictions
    pub dietary_restrictions: Option<String>,
}

#[derive(Debug, Default)]
struct Tables {
    events: BTreeMap<EventId, EventRecord>,
    guests: BTreeMap<GuestId, StoredGuest>,
    next_event_id: i64,
    next_guest_id: i64,
}

#[derive(Debug, Default)]
struct Faults {
    failing_counts: HashSet<EventId>,
    legacy_schema: bool,
    stale_duplicate_check: bool,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-memory record store.
///
/// Clones share the same tables, so a test can keep a handle for
/// assertions after passing another to the service.
///
/// # Example
///
/// ```
/// use rsvp_testing::InMemoryRecordStore;
///
/// let store = InMemoryRecordStore::new();
/// let event_id = store.seed_event("Summer Party");
/// store.fail_rsvp_count_for(event_id);
/// assert_eq!(store.event_count(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<Tables>>,
    faults: Arc<RwLock<Faults>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryRecordStore {
    /// Create an empty store stamped by [`test_clock`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(test_clock()))
    }

    /// Create an empty store stamped by `clock`.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Arc::new(RwLock::new(Tables::default())),
            faults: Arc::new(RwLock::new(Faults::default())),
            clock,
        }
    }

    /// Insert a title-only event (no description, location or date).
    pub fn seed_event(&self, title: &str) -> EventId {
        let mut tables = self.tables.write().unwrap();
        tables.next_event_id += 1;
        let id = EventId::new(tables.next_event_id);
        tables.events.insert(
            id,
            EventRecord {
                id,
                title: title.to_string(),
                description: None,
                event_date: None,
                location: None,
                created_at: Some(self.clock.now()),
            },
        );
        id
    }

    /// Make `count_rsvps` fail for one event.
    pub fn fail_rsvp_count_for(&self, event_id: EventId) {
        self.faults.write().unwrap().failing_counts.insert(event_id);
    }

    /// Behave like a legacy schema whose guests have no event association.
    ///
    /// The scoped duplicate check reports [`StoreError::SchemaMismatch`] and
    /// inserted guests are stored without an event.
    pub fn without_event_association(&self) {
        self.faults.write().unwrap().legacy_schema = true;
    }

    /// Make the scoped duplicate check always answer "no", as if a
    /// concurrent RSVP landed between the check and the insert.
    pub fn stale_duplicate_check(&self) {
        self.faults.write().unwrap().stale_duplicate_check = true;
    }

    /// Make every read fail with [`StoreError::Database`].
    pub fn fail_reads(&self) {
        self.faults.write().unwrap().fail_reads = true;
    }

    /// Make every write fail with [`StoreError::Database`].
    pub fn fail_writes(&self) {
        self.faults.write().unwrap().fail_writes = true;
    }

    /// Number of stored events.
    #[must_use]
    pub fn event_count(&self) -> usize {
        self.tables.read().unwrap().events.len()
    }

    /// Number of stored guests.
    #[must_use]
    pub fn guest_count(&self) -> usize {
        self.tables.read().unwrap().guests.len()
    }

    /// Every stored guest row, ordered by identifier.
    #[must_use]
    pub fn stored_guests(&self) -> Vec<StoredGuest> {
        self.tables.read().unwrap().guests.values().cloned().collect()
    }

    /// A stored event row.
    #[must_use]
    pub fn event(&self, id: EventId) -> Option<EventRecord> {
        self.tables.read().unwrap().events.get(&id).cloned()
    }

    fn read_guard(&self) -> Result<(), StoreError> {
        if self.faults.read().unwrap().fail_reads {
            return Err(StoreError::Database("injected read failure".to_string()));
        }
        Ok(())
    }

    fn write_guard(&self) -> Result<(), StoreError> {
        if self.faults.read().unwrap().fail_writes {
            return Err(StoreError::Database("injected write failure".to_string()));
        }
        Ok(())
    }

    fn count_now(&self, event_id: EventId) -> Result<i64, StoreError> {
        self.read_guard()?;
        if self.faults.read().unwrap().failing_counts.contains(&event_id) {
            return Err(StoreError::Database(format!(
                "injected count failure for event {event_id}"
            )));
        }
        let tables = self.tables.read().unwrap();
        let count = tables
            .guests
            .values()
            .filter(|g| g.event_id == Some(event_id))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    fn exists_for_event_now(&self, event_id: EventId, email: &str) -> Result<bool, StoreError> {
        self.read_guard()?;
        let faults = self.faults.read().unwrap();
        if faults.legacy_schema {
            return Err(StoreError::SchemaMismatch(
                r#"column "event_id" does not exist"#.to_string(),
            ));
        }
        if faults.stale_duplicate_check {
            return Ok(false);
        }
        drop(faults);

        Ok(self
            .tables
            .read()
            .unwrap()
            .guests
            .values()
            .any(|g| g.event_id == Some(event_id) && g.guest.email == email))
    }

    fn exists_now(&self, email: &str) -> Result<bool, StoreError> {
        self.read_guard()?;
        Ok(self
            .tables
            .read()
            .unwrap()
            .guests
            .values()
            .any(|g| g.guest.email == email))
    }

    fn insert_event_now(&self, event: NewEvent) -> Result<EventId, StoreError> {
        self.write_guard()?;
        let mut tables = self.tables.write().unwrap();
        tables.next_event_id += 1;
        let id = EventId::new(tables.next_event_id);
        tables.events.insert(
            id,
            EventRecord {
                id,
                title: event.title,
                description: event.description,
                event_date: Some(event.event_date),
                location: event.location,
                created_at: Some(self.clock.now()),
            },
        );
        Ok(id)
    }

    fn insert_guest_now(&self, new: NewGuest) -> Result<Guest, StoreError> {
        self.write_guard()?;
        let legacy = self.faults.read().unwrap().legacy_schema;
        let event_id = if legacy { None } else { new.event_id };

        let mut tables = self.tables.write().unwrap();
        if let Some(event_id) = event_id {
            let taken = tables
                .guests
                .values()
                .any(|g| g.event_id == Some(event_id) && g.guest.email == new.email);
            if taken {
                return Err(StoreError::UniqueViolation(
                    "guests_event_email_key".to_string(),
                ));
            }
        }

        tables.next_guest_id += 1;
        let guest = Guest {
            id: GuestId::new(tables.next_guest_id),
            name: new.name,
            email: new.email,
            phone: new.phone,
            status: new.status,
            created_at: self.clock.now(),
        };
        tables.guests.insert(
            guest.id,
            StoredGuest {
                guest: guest.clone(),
                event_id,
                notes: new.notes,
                plus_ones: new.plus_ones,
                dietary_restrictions: new.dietary_restrictions,
            },
        );
        Ok(guest)
    }

    fn list_guests_now(&self, query: &GuestQuery) -> Result<Vec<Guest>, StoreError> {
        self.read_guard()?;
        Ok(self
            .tables
            .read()
            .unwrap()
            .guests
            .values()
            .map(|g| &g.guest)
            .filter(|g| query.matches(g))
            .cloned()
            .collect())
    }

    fn delete_guest_now(&self, id: GuestId) -> Result<u64, StoreError> {
        self.write_guard()?;
        let removed = self.tables.write().unwrap().guests.remove(&id);
        Ok(u64::from(removed.is_some()))
    }
}

impl Default for InMemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryRecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRecordStore")
            .field("tables", &self.tables)
            .field("faults", &self.faults)
            .finish_non_exhaustive()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn ping(&self) -> StoreFuture<'_, ()> {
        let result = self.read_guard();
        Box::pin(async move { result })
    }

    fn list_events(&self) -> StoreFuture<'_, Vec<EventRecord>> {
        let result: Result<Vec<EventRecord>, StoreError> = self
            .read_guard()
            .map(|()| self.tables.read().unwrap().events.values().cloned().collect());
        Box::pin(async move { result })
    }

    fn count_rsvps(&self, event_id: EventId) -> StoreFuture<'_, i64> {
        let result = self.count_now(event_id);
        Box::pin(async move { result })
    }

    fn insert_event(&self, event: NewEvent) -> StoreFuture<'_, EventId> {
        let result = self.insert_event_now(event);
        Box::pin(async move { result })
    }

    fn guest_exists_for_event<'a>(
        &'a self,
        event_id: EventId,
        email: &'a str,
    ) -> StoreFuture<'a, bool> {
        let result = self.exists_for_event_now(event_id, email);
        Box::pin(async move { result })
    }

    fn guest_exists<'a>(&'a self, email: &'a str) -> StoreFuture<'a, bool> {
        let result = self.exists_now(email);
        Box::pin(async move { result })
    }

    fn insert_guest(&self, guest: NewGuest) -> StoreFuture<'_, Guest> {
        let result = self.insert_guest_now(guest);
        Box::pin(async move { result })
    }

    fn list_guests<'a>(&'a self, query: &'a GuestQuery) -> StoreFuture<'a, Vec<Guest>> {
        let result = self.list_guests_now(query);
        Box::pin(async move { result })
    }

    fn delete_guest(&self, id: GuestId) -> StoreFuture<'_, u64> {
        let result = self.delete_guest_now(id);
        Box::pin(async move { result })
    }
}
