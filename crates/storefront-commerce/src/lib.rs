//! Catalog projection and shopper selection state for the storefront.
//!
//! This crate holds everything behind a product grid, independent of how
//! it is rendered:
//!
//! - **Catalog**: Immutable products, badges, stock levels
//! - **Search**: Category filter, sort keys, the projected list
//! - **Selection**: Wishlist, cart lines, the bounded compare list
//! - **Quick view**: Option selection and the offer countdown
//! - **Storefront**: The session facade driving cards, toasts and timers
//!
//! # Example
//!
//! ```rust
//! use storefront_commerce::prelude::*;
//!
//! let catalog = Catalog::sample().unwrap();
//! let mut storefront = Storefront::new(catalog, Theme::Light, StorefrontSettings::default());
//!
//! storefront.dispatch(Intent::FilterBy { category: CategoryFilter::category("electronics") });
//! storefront.dispatch(Intent::SortBy { sort: SortKey::PriceHigh });
//!
//! let notifications = storefront.dispatch(Intent::add_to_cart(1));
//! assert_eq!(notifications.len(), 1);
//! assert_eq!(storefront.store().cart().len(), 1);
//! ```

pub mod error;
pub mod ids;
pub mod price;
pub mod settings;
pub mod timer;

pub mod card;
pub mod catalog;
pub mod quick_view;
pub mod search;
pub mod selection;
pub mod storefront;
pub mod toast;

pub use error::{CatalogError, StorefrontError};
pub use ids::*;
pub use price::Price;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, StorefrontError};
    pub use crate::ids::*;
    pub use crate::price::Price;
    pub use crate::settings::{StorefrontSettings, Theme};

    // Catalog
    pub use crate::catalog::{Badge, BadgeStyle, Catalog, ColorOption, Product, StockLevel};

    // Search
    pub use crate::search::{category_facets, project, CatalogQuery, CategoryFilter, FacetValue, SortKey};

    // Selection
    pub use crate::selection::{
        Cart, CartLine, CompareList, CompareTray, SelectionSnapshot, SelectionStore, SharedSelection,
    };

    // Quick view
    pub use crate::quick_view::{QuickView, QuickViewSelection, TimeLeft};

    // Storefront
    pub use crate::card::{ProductCard, Tilt};
    pub use crate::storefront::{Intent, Notification, Snapshot, Storefront};
    pub use crate::toast::{Toast, ADDED_TO_CART_MESSAGE};
}
