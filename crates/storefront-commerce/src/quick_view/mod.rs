//! Quick view module.
//!
//! Contains the product detail modal and its offer countdown.

mod countdown;
mod session;

pub use countdown::{Countdown, TimeLeft};
pub use session::{QuickView, QuickViewSelection};
