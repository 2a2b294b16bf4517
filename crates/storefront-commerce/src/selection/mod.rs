//! Selection module.
//!
//! Contains the wishlist, cart and compare state owned by one shopper.

mod cart;
mod compare;
mod shared;
mod store;

pub use cart::{Cart, CartLine};
pub use compare::{CompareList, CompareTray, COMPARE_CAPACITY};
pub use shared::SharedSelection;
pub use store::{QuickViewSnapshot, SelectionEvent, SelectionSnapshot, SelectionStore};
