//! The immutable product catalog.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::catalog::Product;
use crate::error::{CatalogError, StorefrontError};
use crate::ids::ProductId;

/// Label of the pass-through category chip.
pub const ALL_CATEGORIES: &str = "all";

const SAMPLE_CATALOG: &str = include_str!("../../data/sample_catalog.json");

/// Read-only list of products supplied at startup.
///
/// Products are stored behind `Arc` so the quick view can hold the
/// product it shows without borrowing the catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Arc<Product>>,
    index: HashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, validating every product.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = HashMap::with_capacity(products.len());

        for (position, product) in products.iter().enumerate() {
            validate(product)?;
            if index.insert(product.id, position).is_some() {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }

        Ok(Self {
            products: products.into_iter().map(Arc::new).collect(),
            index,
        })
    }

    /// Load a catalog from its JSON array form.
    pub fn from_json(json: &str) -> Result<Self, StorefrontError> {
        let products: Vec<Product> = serde_json::from_str(json)?;
        Ok(Self::new(products)?)
    }

    /// The built-in sample catalog.
    pub fn sample() -> Result<Self, StorefrontError> {
        Self::from_json(SAMPLE_CATALOG)
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn get(&self, id: ProductId) -> Option<&Arc<Product>> {
        self.index.get(&id).map(|&i| &self.products[i])
    }

    /// Position of a product in catalog order.
    pub fn position(&self, id: ProductId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Category chips: `"all"` followed by each label in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut categories = vec![ALL_CATEGORIES];
        for product in &self.products {
            if seen.insert(product.category.as_str()) {
                categories.push(product.category.as_str());
            }
        }
        categories
    }
}

fn validate(product: &Product) -> Result<(), CatalogError> {
    if product.id.get() == 0 {
        return Err(CatalogError::ZeroId {
            name: product.name.clone(),
        });
    }
    if product.price > product.original_price {
        return Err(CatalogError::PriceAboveOriginal {
            id: product.id,
            price: product.price.display(),
            original_price: product.original_price.display(),
        });
    }
    if product.stock > product.total_stock {
        return Err(CatalogError::StockAboveTotal {
            id: product.id,
            stock: product.stock,
            total_stock: product.total_stock,
        });
    }
    if product.images.is_empty() {
        return Err(CatalogError::NoImages(product.id));
    }
    if !(0.0..=5.0).contains(&product.rating) {
        return Err(CatalogError::RatingOutOfRange {
            id: product.id,
            rating: product.rating,
        });
    }
    Ok(())
}
