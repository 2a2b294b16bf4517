//! Storefront error types.
//!
//! Shopper-facing operations are total and never return these; errors only
//! arise while loading a catalog or parsing configuration values.

use crate::ids::ProductId;
use thiserror::Error;

/// A catalog record that breaks a data-model invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Product IDs must be positive.
    #[error("Product IDs must be positive (found 0 for {name:?})")]
    ZeroId { name: String },

    /// Two products share an ID.
    #[error("Duplicate product ID: {0}")]
    DuplicateId(ProductId),

    /// Price above the original price.
    #[error("Product {id}: price {price} exceeds original price {original_price}")]
    PriceAboveOriginal {
        id: ProductId,
        price: String,
        original_price: String,
    },

    /// Stock above total stock.
    #[error("Product {id}: stock {stock} exceeds total stock {total_stock}")]
    StockAboveTotal {
        id: ProductId,
        stock: u32,
        total_stock: u32,
    },

    /// Product without any image.
    #[error("Product {0} has no images")]
    NoImages(ProductId),

    /// Rating outside 0-5.
    #[error("Product {id}: rating {rating} is outside 0-5")]
    RatingOutOfRange { id: ProductId, rating: f64 },
}

/// Errors that can occur in storefront operations.
#[derive(Error, Debug)]
pub enum StorefrontError {
    /// Invalid catalog data.
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),

    /// Unknown sort key.
    #[error("Unknown sort key: {0}")]
    UnknownSortKey(String),

    /// Unknown theme.
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StorefrontError {
    fn from(e: serde_json::Error) -> Self {
        StorefrontError::Serialization(e.to_string())
    }
}
