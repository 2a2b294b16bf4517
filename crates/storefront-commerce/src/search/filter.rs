//! Category filter.

use crate::catalog::{Product, ALL_CATEGORIES};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which category chip is selected.
///
/// Serializes as the chip label, with `"all"` meaning no filtering.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Pass every product through.
    #[default]
    All,
    /// Keep products whose category equals this label exactly.
    Category(String),
}

impl CategoryFilter {
    /// Parse a chip label.
    pub fn from_label(label: impl Into<String>) -> Self {
        let label = label.into();
        if label == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Category(label)
        }
    }

    pub fn category(label: impl Into<String>) -> Self {
        Self::from_label(label)
    }

    /// Chip label for this filter.
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Category(label) => label,
        }
    }

    /// Exact-match predicate.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(label) => product.category == *label,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }
}

impl From<String> for CategoryFilter {
    fn from(label: String) -> Self {
        CategoryFilter::from_label(label)
    }
}

impl From<&str> for CategoryFilter {
    fn from(label: &str) -> Self {
        CategoryFilter::from_label(label)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Category(label) => label,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
