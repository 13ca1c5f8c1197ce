//! # RSVP Testing
//!
//! Testing utilities for the RSVP backend.
//!
//! This crate provides:
//! - [`InMemoryRecordStore`]: a `RecordStore` with fault injection
//! - [`FixedClock`]: deterministic time
//! - [`init_tracing`]: log capture for tests
//!
//! ## Example
//!
//! ```
//! use rsvp_testing::InMemoryRecordStore;
//! use rsvp_core::RsvpService;
//! use std::sync::Arc;
//!
//! let store = InMemoryRecordStore::new();
//! let service = RsvpService::new(Arc::new(store.clone()));
//! assert_eq!(store.guest_count(), 0);
//! ```

use chrono::{DateTime, Utc};
use rsvp_core::environment::Clock;

mod memory_store;

pub use memory_store::{InMemoryRecordStore, StoredGuest};

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use rsvp_testing::mocks::FixedClock;
    /// use rsvp_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Install a test-friendly tracing subscriber.
///
/// Output goes through the test harness writer so it only shows for failing
/// tests. Safe to call from every test; only the first call installs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }
}
