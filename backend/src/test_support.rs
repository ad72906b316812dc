//! Test utilities for the docket crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`).

pub mod clock {
    //! Deterministic clocks for date-sensitive tests.

    use std::sync::Mutex;

    use chrono::{DateTime, Local, NaiveDate, TimeDelta, TimeZone, Utc};
    use mockable::Clock;

    /// Clock pinned to an instant that tests can move forward.
    pub struct MutableClock(Mutex<DateTime<Utc>>);

    impl MutableClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self(Mutex::new(now))
        }

        /// Clock reading local noon on the given calendar day.
        ///
        /// Noon keeps the local date stable whatever timezone the tests run
        /// in.
        ///
        /// # Examples
        /// ```
        /// use docket::test_support::clock::MutableClock;
        /// use mockable::Clock;
        ///
        /// let clock = MutableClock::at_local_noon(2025, 10, 10);
        /// assert_eq!(clock.local().format("%y%m%d").to_string(), "251010");
        /// ```
        pub fn at_local_noon(year: i32, month: u32, day: u32) -> Self {
            let Some(date) = NaiveDate::from_ymd_opt(year, month, day) else {
                panic!("invalid calendar day {year}-{month}-{day}");
            };
            let Some(noon) = date.and_hms_opt(12, 0, 0) else {
                panic!("noon is always valid");
            };
            let Some(local) = Local.from_local_datetime(&noon).earliest() else {
                panic!("local noon does not exist on {date}");
            };
            Self::new(local.with_timezone(&Utc))
        }

        pub fn advance_days(&self, days: i64) {
            *self.lock_clock() += TimeDelta::days(days);
        }

        fn lock_clock(&self) -> std::sync::MutexGuard<'_, DateTime<Utc>> {
            match self.0.lock() {
                Ok(guard) => guard,
                Err(_) => panic!("clock mutex"),
            }
        }
    }

    impl Clock for MutableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.lock_clock()
        }
    }
}
