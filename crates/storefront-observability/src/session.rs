//! A storefront wired to logging, metrics and optional recording.

use std::time::{Duration, Instant};

use storefront_commerce::storefront::{Intent, Notification, Storefront};

use crate::logging::{LogLevel, StructuredLogger};
use crate::metrics::{MetricsCollector, SessionMetrics};
use crate::replay::{Recording, ReplayRecorder};

/// Drives a [`Storefront`] while observing every intent and clock step.
#[derive(Debug)]
pub struct ObservedSession {
    storefront: Storefront,
    logger: StructuredLogger,
    metrics: MetricsCollector,
    recorder: Option<ReplayRecorder>,
}

impl ObservedSession {
    pub fn new(storefront: Storefront, logger: StructuredLogger) -> Self {
        let metrics = MetricsCollector::new(storefront.session_id().clone());
        Self {
            storefront,
            logger,
            metrics,
            recorder: None,
        }
    }

    /// Record every dispatched intent for later replay.
    pub fn with_recorder(mut self, recorder: ReplayRecorder) -> Self {
        self.recorder = Some(recorder);
        self
    }

    pub fn storefront(&self) -> &Storefront {
        &self.storefront
    }

    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    pub fn dispatch(&mut self, intent: Intent) -> Vec<Notification> {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.record_intent(self.storefront.now(), &intent);
        }

        let kind = intent.kind();
        let started = Instant::now();
        let notifications = self.storefront.dispatch(intent.clone());
        let elapsed = started.elapsed();

        self.metrics.record_dispatch(&intent, elapsed, &notifications);
        self.logger.set_clock(clock_ms(&self.storefront));
        self.logger
            .debug_builder("intent applied")
            .field("kind", kind)
            .field_u64("notifications", notifications.len() as u64)
            .emit();
        self.log_notifications(&notifications);

        notifications
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<Notification> {
        let notifications = self.storefront.advance(dt);
        self.metrics.record_notifications(&notifications);
        self.logger.set_clock(clock_ms(&self.storefront));
        self.log_notifications(&notifications);
        notifications
    }

    fn log_notifications(&self, notifications: &[Notification]) {
        for notification in notifications {
            match notification {
                Notification::ToastShown { message, duration_ms } => self
                    .logger
                    .info_builder("toast shown")
                    .field("message", message.clone())
                    .field_u64("duration_ms", *duration_ms)
                    .emit(),
                Notification::ToastDismissed => {
                    self.logger.log_with_fields(LogLevel::Info, "toast dismissed", Default::default())
                }
            }
        }
    }

    /// End the session, returning its metrics and recording (if recording).
    pub fn finish(self) -> (Storefront, SessionMetrics, Option<Recording>) {
        let metrics = self.metrics.finalize(&self.storefront);
        self.logger
            .info_builder("session finished")
            .field_u64("intents", metrics.total_intents)
            .field_u64("cart_lines", metrics.cart_lines as u64)
            .emit();
        let recording = self
            .recorder
            .map(|recorder| recorder.finalize(&self.storefront, Some(metrics.clone())));
        (self.storefront, metrics, recording)
    }
}

fn clock_ms(storefront: &Storefront) -> u64 {
    u64::try_from(storefront.now().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::ReplayPlayer;
    use storefront_commerce::prelude::*;

    fn session(record: bool) -> ObservedSession {
        let storefront = Storefront::new(
            Catalog::sample().unwrap(),
            Theme::Light,
            StorefrontSettings::default(),
        );
        let logger = StructuredLogger::new(storefront.session_id().clone()).with_min_level(LogLevel::Error);
        let recorder = ReplayRecorder::new(&storefront);
        let session = ObservedSession::new(storefront, logger);
        if record {
            session.with_recorder(recorder)
        } else {
            session
        }
    }

    #[test]
    fn test_finish_reports_metrics() {
        let mut session = session(false);
        session.dispatch(Intent::add_to_cart(3));
        session.advance(Duration::from_secs(3));

        let (storefront, metrics, recording) = session.finish();
        assert!(recording.is_none());
        assert_eq!(metrics.toasts_shown, 1);
        assert_eq!(metrics.toasts_dismissed, 1);
        assert_eq!(storefront.store().cart().len(), 1);
    }

    #[test]
    fn test_recorded_session_replays() {
        let mut session = session(true);
        assert!(session.is_recording());
        session.dispatch(Intent::FilterBy {
            category: CategoryFilter::category("fashion"),
        });
        session.advance(Duration::from_millis(700));
        session.dispatch(Intent::OpenQuickView {
            product_id: ProductId::new(6),
        });
        session.dispatch(Intent::SetQuantity { quantity: 4 });
        session.dispatch(Intent::ConfirmAddToCart);

        let (_, metrics, recording) = session.finish();
        let recording = recording.unwrap();
        assert_eq!(recording.metrics.as_ref(), Some(&metrics));

        let diff = ReplayPlayer::new(recording).verify(Catalog::sample().unwrap());
        assert!(diff.matches, "unexpected diffs: {:?}", diff.field_diffs);
    }
}
