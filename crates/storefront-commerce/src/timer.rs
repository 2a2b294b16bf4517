//! Timers on the session clock.
//!
//! The session clock is a `Duration` since the session started, advanced
//! explicitly by the owner of the storefront. Timers never run on their
//! own: their owner polls them with the current time. A timer is cancelled
//! by dropping it, so a component that is retired cannot be woken again.

use std::time::Duration;

/// Smallest period an interval may have.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// A repeating timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next_due: Duration,
}

impl Interval {
    /// Start an interval whose first tick is one period after `now`.
    pub fn start(now: Duration, period: Duration) -> Self {
        let period = period.max(MIN_PERIOD);
        Self {
            period,
            next_due: now + period,
        }
    }

    /// Number of ticks elapsed up to `now`, consuming them.
    pub fn poll(&mut self, now: Duration) -> u32 {
        if now < self.next_due {
            return 0;
        }
        let period_ns = self.period.as_nanos();
        let behind_ns = (now - self.next_due).as_nanos();
        let ticks = behind_ns / period_ns + 1;
        let advance_ns = ticks * period_ns;
        self.next_due += Duration::from_nanos(u64::try_from(advance_ns).unwrap_or(u64::MAX));
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn next_due(&self) -> Duration {
        self.next_due
    }
}

/// A one-shot timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    due: Duration,
}

impl Deadline {
    /// A deadline `delay` after `now`.
    pub fn after(now: Duration, delay: Duration) -> Self {
        Self { due: now + delay }
    }

    pub fn is_due(&self, now: Duration) -> bool {
        now >= self.due
    }

    /// Time left before the deadline, zero once due.
    pub fn remaining(&self, now: Duration) -> Duration {
        self.due.saturating_sub(now)
    }

    pub fn due(&self) -> Duration {
        self.due
    }
}
