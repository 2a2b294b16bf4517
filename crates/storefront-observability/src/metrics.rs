//! Session-level counters and timings.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use storefront_commerce::storefront::{Intent, Notification, Storefront};
use storefront_commerce::SessionId;

/// Metrics for a single shopper session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetrics {
    /// Session ID for correlation.
    pub session_id: String,
    /// Intents applied, by kind.
    pub intents: BTreeMap<String, u64>,
    /// Total intents applied.
    pub total_intents: u64,
    /// Times the product list was recomputed.
    pub projections: u64,
    /// Wall time spent in filter and sort intents (microseconds).
    pub projection_time_us: u64,
    /// Wall time spent in all intents (microseconds).
    pub dispatch_time_us: u64,
    pub toasts_shown: u64,
    pub toasts_dismissed: u64,
    /// Session clock at the end (milliseconds).
    pub session_clock_ms: u64,
    /// Final cart line count.
    pub cart_lines: usize,
    /// Final wishlist size.
    pub wishlist_size: usize,
    /// Final compare list size.
    pub compared: usize,
}

/// Collector for session metrics.
#[derive(Debug)]
pub struct MetricsCollector {
    session_id: SessionId,
    start: Instant,
    intents: BTreeMap<String, u64>,
    projection_time: Duration,
    dispatch_time: Duration,
    toasts_shown: u64,
    toasts_dismissed: u64,
}

impl MetricsCollector {
    pub fn new(session_id: SessionId) -> Self {
        Self {
            session_id,
            start: Instant::now(),
            intents: BTreeMap::new(),
            projection_time: Duration::ZERO,
            dispatch_time: Duration::ZERO,
            toasts_shown: 0,
            toasts_dismissed: 0,
        }
    }

    /// Record one dispatched intent and what it produced.
    pub fn record_dispatch(&mut self, intent: &Intent, elapsed: Duration, notifications: &[Notification]) {
        *self.intents.entry(intent.kind().to_string()).or_insert(0) += 1;
        self.dispatch_time += elapsed;
        if intent.reprojects() {
            self.projection_time += elapsed;
        }
        self.record_notifications(notifications);
    }

    /// Record notifications produced by advancing the clock.
    pub fn record_notifications(&mut self, notifications: &[Notification]) {
        for notification in notifications {
            match notification {
                Notification::ToastShown { .. } => self.toasts_shown += 1,
                Notification::ToastDismissed => self.toasts_dismissed += 1,
            }
        }
    }

    pub fn intent_count(&self, kind: &str) -> u64 {
        self.intents.get(kind).copied().unwrap_or(0)
    }

    /// Get total wall time since the collector was created.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Finalize against the session's end state.
    pub fn finalize(self, storefront: &Storefront) -> SessionMetrics {
        let store = storefront.store();
        SessionMetrics {
            session_id: self.session_id.to_string(),
            total_intents: self.intents.values().sum(),
            intents: self.intents,
            projections: storefront.projection_count(),
            projection_time_us: micros(self.projection_time),
            dispatch_time_us: micros(self.dispatch_time),
            toasts_shown: self.toasts_shown,
            toasts_dismissed: self.toasts_dismissed,
            session_clock_ms: u64::try_from(storefront.now().as_millis()).unwrap_or(u64::MAX),
            cart_lines: store.cart().len(),
            wishlist_size: store.wishlist().len(),
            compared: store.compare_list().len(),
        }
    }
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}

impl SessionMetrics {
    /// Format as JSON.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Format as JSON (pretty printed).
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Format as human-readable summary.
    pub fn to_summary(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!("Session: {}", self.session_id));
        lines.push(format!("  Session clock: {}ms", self.session_clock_ms));
        lines.push(format!(
            "  Intents: {} ({:.2}ms)",
            self.total_intents,
            self.dispatch_time_us as f64 / 1000.0
        ));
        for (kind, count) in &self.intents {
            lines.push(format!("    {}: {}", kind, count));
        }
        lines.push(format!(
            "  Projections: {} ({:.2}ms in filter/sort)",
            self.projections,
            self.projection_time_us as f64 / 1000.0
        ));
        lines.push(format!(
            "  Toasts: {} shown, {} dismissed",
            self.toasts_shown, self.toasts_dismissed
        ));
        lines.push(format!(
            "  Selection: {} cart lines, {} wished, {} compared",
            self.cart_lines, self.wishlist_size, self.compared
        ));

        lines.join("\n")
    }
}
