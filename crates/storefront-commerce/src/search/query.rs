//! Sort keys and the catalog projection.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, Product};
use crate::error::StorefrontError;
use crate::search::CategoryFilter;
use serde::{Deserialize, Serialize};

/// Sort options offered by the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order.
    #[default]
    Featured,
    /// Highest ID first.
    Newest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Best rated first.
    Rating,
}

impl SortKey {
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::Newest,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::Newest => "newest",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::Newest => "Newest First",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
        }
    }

    /// Comparator for this key, `None` for catalog order.
    fn compare(&self, a: &Product, b: &Product) -> Option<Ordering> {
        match self {
            SortKey::Featured => None,
            SortKey::Newest => Some(b.id.cmp(&a.id)),
            SortKey::PriceLow => Some(a.price.cmp(&b.price)),
            SortKey::PriceHigh => Some(b.price.cmp(&a.price)),
            SortKey::Rating => Some(b.rating.total_cmp(&a.rating)),
        }
    }
}

impl FromStr for SortKey {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| StorefrontError::UnknownSortKey(s.to_string()))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filter and sort pair applied to the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogQuery {
    pub category: CategoryFilter,
    pub sort: SortKey,
}

impl CatalogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Run the projection against a catalog.
    pub fn project<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        project(catalog, &self.category, self.sort)
    }
}

/// Filter then sort the catalog for display.
///
/// Pure and allocation-light: the catalog is never modified, and ties
/// keep their relative catalog order because `sort_by` is stable.
pub fn project<'a>(catalog: &'a Catalog, filter: &CategoryFilter, sort: SortKey) -> Vec<&'a Product> {
    let mut products: Vec<&Product> = catalog
        .products()
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| filter.matches(p))
        .collect();

    if sort != SortKey::Featured {
        products.sort_by(|a, b| sort.compare(a, b).unwrap_or(Ordering::Equal));
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ProductId;
    use crate::price::Price;

    fn catalog() -> Catalog {
        Catalog::new(vec![
            Product::new(1, "A", "audio", Price::new(3000)).with_rating(4.5, 10),
            Product::new(2, "B", "home", Price::new(1000)).with_rating(4.9, 10),
            Product::new(3, "C", "audio", Price::new(1000)).with_rating(4.5, 10),
            Product::new(4, "D", "home", Price::new(5000)).with_rating(3.0, 10),
            Product::new(5, "E", "audio", Price::new(2000)).with_rating(4.9, 10),
        ])
        .unwrap()
    }

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id.get()).collect()
    }

    #[test]
    fn test_featured_all_is_identity() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::All, SortKey::Featured);
        assert_eq!(ids(&result), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_newest_orders_by_descending_id() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::All, SortKey::Newest);
        assert_eq!(ids(&result), vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_price_low_is_stable() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::All, SortKey::PriceLow);
        // 2 and 3 tie at 10.00 and keep catalog order
        assert_eq!(ids(&result), vec![2, 3, 5, 1, 4]);
        for pair in result.windows(2) {
            assert!(pair[0].price <= pair[1].price);
        }
    }

    #[test]
    fn test_price_high() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::All, SortKey::PriceHigh);
        assert_eq!(ids(&result), vec![4, 1, 5, 2, 3]);
    }

    #[test]
    fn test_rating_ties_keep_catalog_order() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::All, SortKey::Rating);
        assert_eq!(ids(&result), vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_filter_then_sort() {
        let catalog = catalog();
        let query = CatalogQuery::new()
            .with_category("audio")
            .with_sort(SortKey::PriceHigh);
        assert_eq!(ids(&query.project(&catalog)), vec![1, 5, 3]);
    }

    #[test]
    fn test_unknown_category_yields_nothing() {
        let catalog = catalog();
        let result = project(&catalog, &CategoryFilter::category("garden"), SortKey::Featured);
        assert!(result.is_empty());
    }

    #[test]
    fn test_projection_is_idempotent_and_pure() {
        let catalog = catalog();
        let first = ids(&project(&catalog, &CategoryFilter::All, SortKey::Rating));
        let second = ids(&project(&catalog, &CategoryFilter::All, SortKey::Rating));
        assert_eq!(first, second);
        assert_eq!(catalog.products()[0].id, ProductId::new(1));
    }

    #[test]
    fn test_sort_key_parsing() {
        assert_eq!("price-low".parse::<SortKey>().unwrap(), SortKey::PriceLow);
        assert!("cheapest".parse::<SortKey>().is_err());
        for key in SortKey::ALL {
            assert_eq!(key.as_str().parse::<SortKey>().unwrap(), key);
        }
    }

    #[test]
    fn test_sort_key_serde_matches_labels() {
        let json = serde_json::to_string(&SortKey::PriceHigh).unwrap();
        assert_eq!(json, "\"price-high\"");
    }
}
