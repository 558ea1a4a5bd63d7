// File: ./src/clock.rs
/*! Wall-clock abstraction used by alias resolution.

Resolving `today`, `tomorrow`, `now` or `eod` depends on the current local
time. Instead of reading `Local::now()` deep inside the resolver, callers
pass a `Clock`:

- `SystemClock`: the real local wall clock.
- `FixedClock`: a settable clock for tests and replays. It can be moved
  forward to simulate a value going stale overnight.
*/

use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use std::sync::Mutex;

/// Source of the current local date and time.
///
/// The trait is object-safe so callers can hold `Arc<dyn Clock>`.
pub trait Clock: Send + Sync + std::fmt::Debug {
    /// Current wall time in the caller's local calendar.
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Builds a clock from `YYYY-MM-DDTHH:MM:SS`. Returns `None` on malformed input.
    pub fn parse(s: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(Self::new)
    }

    pub fn set(&self, now: NaiveDateTime) {
        *self.lock() = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut guard = self.lock();
        *guard += by;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NaiveDateTime> {
        // A poisoned clock still holds a valid timestamp.
        self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        *self.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_reports_its_date() {
        let clock = FixedClock::parse("2024-07-19T10:30:00").unwrap();
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 7, 19).unwrap());
    }

    #[test]
    fn advancing_crosses_midnight() {
        let clock = FixedClock::parse("2024-07-19T23:59:59").unwrap();
        clock.advance(Duration::seconds(2));
        assert_eq!(clock.today(), NaiveDate::from_ymd_opt(2024, 7, 20).unwrap());
    }

    #[test]
    fn malformed_timestamp_is_rejected() {
        assert!(FixedClock::parse("2024-07-19 10:30").is_none());
    }
}
