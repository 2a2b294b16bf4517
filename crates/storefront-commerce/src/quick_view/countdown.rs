//! Flash-sale offer countdown.

use std::fmt;
use std::time::Duration;

use crate::timer::Interval;
use serde::{Deserialize, Serialize};

/// Remaining offer time broken into clock fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TimeLeft {
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl TimeLeft {
    /// Split a millisecond duration, dropping sub-second remainder.
    pub fn from_millis(millis: u64) -> Self {
        let total_seconds = millis / 1000;
        Self {
            hours: total_seconds / 3600,
            minutes: (total_seconds % 3600) / 60,
            seconds: total_seconds % 60,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

impl fmt::Display for TimeLeft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// A local copy of an offer's remaining time, stepped down once per tick.
///
/// The catalog value is never touched. At zero the countdown freezes and
/// its ticker is released.
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining_ms: u64,
    step_ms: u64,
    ticker: Option<Interval>,
}

impl Countdown {
    pub fn start(now: Duration, remaining_ms: u64, tick: Duration) -> Self {
        let ticker = (remaining_ms > 0).then(|| Interval::start(now, tick));
        let step_ms = ticker
            .as_ref()
            .map(|t| u64::try_from(t.period().as_millis()).unwrap_or(u64::MAX))
            .unwrap_or(0);
        Self {
            remaining_ms,
            step_ms,
            ticker,
        }
    }

    /// Apply every tick elapsed up to `now`. Returns whether the display changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(ticker) = self.ticker.as_mut() else {
            return false;
        };
        let fired = ticker.poll(now);
        if fired == 0 {
            return false;
        }
        let before = self.remaining_ms;
        self.remaining_ms = self
            .remaining_ms
            .saturating_sub(self.step_ms.saturating_mul(u64::from(fired)));
        if self.remaining_ms == 0 {
            tracing::trace!("offer countdown reached zero");
            self.ticker = None;
        }
        before != self.remaining_ms
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    pub fn time_left(&self) -> TimeLeft {
        TimeLeft::from_millis(self.remaining_ms)
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_ms == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_time_left_fields() {
        let left = TimeLeft::from_millis(2 * 3_600_000 + 5 * 60_000 + 9_500);
        assert_eq!(
            left,
            TimeLeft {
                hours: 2,
                minutes: 5,
                seconds: 9
            }
        );
        assert_eq!(left.to_string(), "02:05:09");
    }

    #[test]
    fn test_countdown_decrements_per_tick() {
        let mut countdown = Countdown::start(ms(0), 5_000, ms(1000));
        assert!(!countdown.tick(ms(999)));
        assert!(countdown.tick(ms(1000)));
        assert_eq!(countdown.remaining_ms(), 4_000);
        assert!(countdown.tick(ms(3000)));
        assert_eq!(countdown.time_left().seconds, 2);
    }

    #[test]
    fn test_countdown_freezes_at_zero() {
        let mut countdown = Countdown::start(ms(0), 1_500, ms(1000));
        countdown.tick(ms(10_000));
        assert!(countdown.is_expired());
        assert_eq!(countdown.time_left().to_string(), "00:00:00");
        assert!(!countdown.tick(ms(20_000)));
    }

    #[test]
    fn test_zero_offer_never_ticks() {
        let mut countdown = Countdown::start(ms(0), 0, ms(1000));
        assert!(countdown.is_expired());
        assert!(!countdown.tick(ms(5_000)));
    }
}
