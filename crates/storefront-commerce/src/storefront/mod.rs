//! Storefront module.
//!
//! Contains the session facade, its intents and its snapshot.

mod intent;
mod session;
mod snapshot;

pub use intent::{Intent, Notification};
pub use session::Storefront;
pub use snapshot::{CompareTraySnapshot, Snapshot};
