//! # EventEase Testing
//!
//! Testing utilities for EventEase.
//!
//! This crate provides:
//! - Deterministic clocks (`FixedClock`, `ManualClock`)
//! - A scripted content generator standing in for the Gemini client
//! - Fixtures for the demo cast and events
//! - proptest strategies for ledger property tests
//!
//! ## Example
//!
//! ```
//! use eventease_testing::{fixtures, test_clock};
//! use eventease_core::environment::Clock;
//!
//! let organizer = fixtures::approved_organizer();
//! let event = fixtures::event(organizer.id, 10);
//! assert_eq!(event.capacity, 10);
//! assert_eq!(test_clock().now().to_rfc3339(), "2025-01-01T00:00:00+00:00");
//! ```

use chrono::{DateTime, Utc};
use eventease_core::environment::Clock;

pub mod fixtures;
pub mod generator;
pub mod properties;

/// Mock implementations for testing.
pub mod mocks {
    use super::{Clock, DateTime, Utc};
    use std::sync::{Arc, Mutex, PoisonError};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use eventease_testing::mocks::FixedClock;
    /// use eventease_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
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

    /// Clock that only moves when told to. Clones share the same time.
    ///
    /// ```
    /// use eventease_testing::mocks::ManualClock;
    /// use eventease_core::environment::Clock;
    ///
    /// let clock = ManualClock::starting_at(eventease_testing::test_clock().now());
    /// let before = clock.now();
    /// clock.advance(chrono::Duration::minutes(5));
    /// assert_eq!(clock.now() - before, chrono::Duration::minutes(5));
    /// ```
    #[derive(Debug, Clone)]
    pub struct ManualClock {
        time: Arc<Mutex<DateTime<Utc>>>,
    }

    impl ManualClock {
        /// Create a clock frozen at `time`
        #[must_use]
        pub fn starting_at(time: DateTime<Utc>) -> Self {
            Self {
                time: Arc::new(Mutex::new(time)),
            }
        }

        /// Move the clock forward
        pub fn advance(&self, by: chrono::Duration) {
            let mut time = self.time.lock().unwrap_or_else(PoisonError::into_inner);
            *time += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.time.lock().unwrap_or_else(PoisonError::into_inner)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(DateTime::<Utc>::UNIX_EPOCH + chrono::Duration::seconds(1_735_689_600))
    }
}

/// Installs a test-friendly `tracing` subscriber honoring `RUST_LOG`.
///
/// Safe to call from every test; only the first call installs it.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// Re-export commonly used items
pub use generator::ScriptedGenerator;
pub use mocks::{FixedClock, ManualClock, test_clock};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
        assert_eq!(time1.to_rfc3339(), "2025-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_manual_clock_clones_share_time() {
        let clock = ManualClock::starting_at(test_clock().now());
        let shared = clock.clone();
        clock.advance(chrono::Duration::seconds(90));
        assert_eq!(shared.now(), clock.now());
        assert_eq!(shared.now() - test_clock().now(), chrono::Duration::seconds(90));
    }
}
