//! Category facets for the filter panel.

use crate::catalog::{Catalog, ALL_CATEGORIES};
use crate::search::CategoryFilter;
use serde::{Deserialize, Serialize};

/// A single facet value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FacetValue {
    /// Chip label.
    pub value: String,
    /// Number of products behind the chip.
    pub count: usize,
    /// Whether currently selected.
    pub selected: bool,
}

/// Category chips with their product counts.
///
/// The first value is always `"all"` counting the whole catalog; the
/// rest follow `Catalog::categories` order.
pub fn category_facets(catalog: &Catalog, selected: &CategoryFilter) -> Vec<FacetValue> {
    catalog
        .categories()
        .into_iter()
        .map(|label| {
            let count = if label == ALL_CATEGORIES {
                catalog.len()
            } else {
                catalog
                    .products()
                    .iter()
                    .filter(|p| p.category == label)
                    .count()
            };
            FacetValue {
                value: label.to_string(),
                count,
                selected: selected.label() == label,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;
    use crate::price::Price;

    #[test]
    fn test_category_facets() {
        let catalog = Catalog::new(vec![
            Product::new(1, "A", "audio", Price::new(100)),
            Product::new(2, "B", "home", Price::new(100)),
            Product::new(3, "C", "audio", Price::new(100)),
        ])
        .unwrap();

        let facets = category_facets(&catalog, &CategoryFilter::category("audio"));
        assert_eq!(facets.len(), 3);
        assert_eq!(facets[0].value, "all");
        assert_eq!(facets[0].count, 3);
        assert!(!facets[0].selected);
        assert_eq!(facets[1].value, "audio");
        assert_eq!(facets[1].count, 2);
        assert!(facets[1].selected);
        assert_eq!(facets[2].count, 1);
    }
}
