//! Product catalog module.
//!
//! Contains the immutable catalog, product records and stock display helpers.

mod catalog;
mod inventory;
mod product;

pub use catalog::{Catalog, ALL_CATEGORIES};
pub use inventory::{StockLevel, SCARCE_STOCK_THRESHOLD};
pub use product::{Badge, BadgeStyle, ColorOption, Product};
