//! Client-side session timeout.
//!
//! The clock starts when the signed-in shell mounts, not when the server
//! issued the token. It only drives a "please log in again" prompt; the
//! token store and API calls are left alone.
//!
//! The shell owns a [`WatchdogSlot`] and hands it to whatever shows the
//! prompt. Pages below the shell come and go on every navigation, so the
//! start time lives in the slot rather than in any of them.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// How often the navbar re-checks the watchdog.
pub const WATCHDOG_POLL: Duration = Duration::from_secs(60);

pub const TIMEOUT_HOURS: i64 = 24;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionWatchdog {
    started_at: DateTime<Utc>,
    timeout: TimeDelta,
}

impl SessionWatchdog {
    pub fn start(now: DateTime<Utc>) -> Self {
        Self {
            started_at: now,
            timeout: TimeDelta::hours(TIMEOUT_HOURS),
        }
    }

    pub fn with_timeout(mut self, timeout: TimeDelta) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Strictly more than the timeout has passed.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now - self.started_at > self.timeout
    }
}

/// Shared home of the shell's watchdog. Clones share one clock.
#[derive(Clone, Debug, Default)]
pub struct WatchdogSlot(Rc<Cell<Option<SessionWatchdog>>>);

impl PartialEq for WatchdogSlot {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl WatchdogSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// The running watchdog, started at `now` if this is the first caller.
    pub fn start_or_resume(&self, now: DateTime<Utc>) -> SessionWatchdog {
        if let Some(running) = self.0.get() {
            return running;
        }
        let started = SessionWatchdog::start(now);
        self.0.set(Some(started));
        started
    }

    pub fn current(&self) -> Option<SessionWatchdog> {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let start = Utc::now();
        let dog = SessionWatchdog::start(start);

        assert!(!dog.is_expired(start));
        assert!(!dog.is_expired(start + TimeDelta::hours(23)));
        assert!(!dog.is_expired(start + TimeDelta::hours(24)));
        assert!(dog.is_expired(start + TimeDelta::hours(24) + TimeDelta::seconds(1)));
    }

    #[test]
    fn test_custom_timeout() {
        let start = Utc::now();
        let dog = SessionWatchdog::start(start).with_timeout(TimeDelta::minutes(5));
        assert!(dog.is_expired(start + TimeDelta::minutes(6)));
    }

    #[test]
    fn test_slot_keeps_first_start() {
        let start = Utc::now();
        let slot = WatchdogSlot::new();
        assert!(slot.current().is_none());

        let first = slot.start_or_resume(start);
        // A later mount under the same shell, e.g. after changing page
        let again = slot.clone().start_or_resume(start + TimeDelta::hours(3));

        assert_eq!(first.started_at(), start);
        assert_eq!(again.started_at(), start);
        assert_eq!(slot.current(), Some(first));
    }

    #[test]
    fn test_slot_expiry_survives_remount() {
        let start = Utc::now();
        let slot = WatchdogSlot::new();
        slot.start_or_resume(start);

        let later = start + TimeDelta::hours(TIMEOUT_HOURS) + TimeDelta::minutes(1);
        assert!(slot.start_or_resume(later).is_expired(later));
    }

    #[test]
    fn test_separate_shells_have_separate_clocks() {
        let start = Utc::now();
        let first = WatchdogSlot::new();
        let second = WatchdogSlot::new();
        first.start_or_resume(start);

        let next = start + TimeDelta::hours(30);
        assert_eq!(second.start_or_resume(next).started_at(), next);
        assert_ne!(first, second);
        assert_eq!(first, first.clone());
    }
}
