//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`).

pub mod clock {
    //! Deterministic clocks for services that stamp audit timestamps.

    use std::sync::Arc;

    use chrono::{DateTime, Local, TimeZone, Utc};
    use mockable::Clock;

    /// Clock frozen at a fixed instant.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FixtureClock {
        utc_now: DateTime<Utc>,
    }

    impl FixtureClock {
        /// Freeze the clock at `utc_now`.
        pub fn at(utc_now: DateTime<Utc>) -> Self {
            Self { utc_now }
        }

        /// Shared handle suitable for service constructors.
        pub fn shared(self) -> Arc<dyn Clock> {
            Arc::new(self)
        }
    }

    impl Default for FixtureClock {
        fn default() -> Self {
            Self::at(fixture_instant())
        }
    }

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.utc_now.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.utc_now
        }
    }

    /// Instant used by [`FixtureClock::default`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mockable::Clock;
    /// use notevault::test_support::clock::{FixtureClock, fixture_instant};
    ///
    /// assert_eq!(FixtureClock::default().utc(), fixture_instant());
    /// ```
    pub fn fixture_instant() -> DateTime<Utc> {
        Utc.timestamp_opt(1_767_225_600, 0)
            .single()
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }
}
