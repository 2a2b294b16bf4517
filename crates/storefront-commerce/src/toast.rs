//! Transient notifications.

use std::time::Duration;

use crate::timer::Deadline;
use serde::{Deserialize, Serialize};

/// Message shown after any add-to-cart.
pub const ADDED_TO_CART_MESSAGE: &str = "Added to cart successfully!";

/// A toast as shown to the shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub message: String,
    /// Auto-dismiss delay.
    pub duration_ms: u64,
}

/// Single-slot toast display.
///
/// Showing a toast replaces the current one and restarts the dismissal
/// timer.
#[derive(Debug, Clone)]
pub struct ToastEmitter {
    duration: Duration,
    active: Option<(Toast, Deadline)>,
}

impl ToastEmitter {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            active: None,
        }
    }

    pub fn show(&mut self, message: impl Into<String>, now: Duration) -> Toast {
        let toast = Toast {
            message: message.into(),
            duration_ms: u64::try_from(self.duration.as_millis()).unwrap_or(u64::MAX),
        };
        self.active = Some((toast.clone(), Deadline::after(now, self.duration)));
        toast
    }

    /// Close the toast early. Returns whether one was showing.
    pub fn dismiss(&mut self) -> bool {
        self.active.take().is_some()
    }

    /// Dismiss the toast if its time is up, returning it.
    pub fn tick(&mut self, now: Duration) -> Option<Toast> {
        let due = self
            .active
            .as_ref()
            .is_some_and(|(_, deadline)| deadline.is_due(now));
        if !due {
            return None;
        }
        self.active.take().map(|(toast, _)| toast)
    }

    pub fn current(&self) -> Option<&Toast> {
        self.active.as_ref().map(|(toast, _)| toast)
    }

    /// Time until the current toast auto-dismisses.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.active.as_ref().map(|(_, deadline)| deadline.remaining(now))
    }
}

impl Default for ToastEmitter {
    fn default() -> Self {
        Self::new(Duration::from_millis(3000))
    }
}
