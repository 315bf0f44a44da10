//! Time source passed explicitly into the store and handlers.

use std::sync::atomic::{AtomicI64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Deterministic clock for tests: every read returns the current value,
/// then advances it by `step_millis`.
#[derive(Debug)]
pub struct ManualClock {
    next: AtomicI64,
    step_millis: i64,
}

impl ManualClock {
    pub fn new(start_millis: i64, step_millis: i64) -> Self {
        Self {
            next: AtomicI64::new(start_millis),
            step_millis,
        }
    }

    /// A clock that never advances.
    pub fn fixed(at_millis: i64) -> Self {
        Self::new(at_millis, 0)
    }

    /// Move the clock to an absolute instant.
    pub fn set(&self, at_millis: i64) {
        self.next.store(at_millis, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.next.fetch_add(self.step_millis, Ordering::SeqCst)
    }
}

impl<T: Clock + ?Sized> Clock for std::sync::Arc<T> {
    fn now_millis(&self) -> i64 {
        (**self).now_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_by_step() {
        let clock = ManualClock::new(1_000, 10);
        assert_eq!(clock.now_millis(), 1_000);
        assert_eq!(clock.now_millis(), 1_010);
        clock.set(5);
        assert_eq!(clock.now_millis(), 5);
    }

    #[test]
    fn fixed_clock_stands_still() {
        let clock = ManualClock::fixed(42);
        assert_eq!(clock.now_millis(), 42);
        assert_eq!(clock.now_millis(), 42);
    }

    #[test]
    fn system_clock_is_after_2020() {
        assert!(SystemClock.now_millis() > 1_577_836_800_000);
    }
}
