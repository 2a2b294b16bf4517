//! Observability for storefront sessions.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with session context
//! - `MetricsCollector` - Intent counts, projections and toast activity
//! - `ReplayRecorder` / `ReplayPlayer` - Record a session and replay it
//! - `ObservedSession` - A storefront wired to all of the above

mod logging;
mod metrics;
mod replay;
mod session;

pub use logging::*;
pub use metrics::*;
pub use replay::*;
pub use session::*;

// Re-export SessionId from storefront-commerce for convenience
pub use storefront_commerce::SessionId;

use thiserror::Error;

/// Errors raised while configuring observability.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ObservabilityError {
    #[error("Unknown log level: {0}")]
    UnknownLogLevel(String),

    #[error("Unknown log format: {0} (expected json or human)")]
    UnknownLogFormat(String),
}
