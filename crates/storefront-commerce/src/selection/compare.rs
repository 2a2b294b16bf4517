//! Compare list and the compare tray projection.

use crate::catalog::{Catalog, Product};
use crate::ids::ProductId;
use serde::{Deserialize, Serialize};

/// Default capacity of the compare list.
pub const COMPARE_CAPACITY: usize = 4;

/// Bounded set of products picked for comparison, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompareList {
    ids: Vec<ProductId>,
    capacity: usize,
}

impl CompareList {
    pub fn new(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Set membership to `desired`.
    ///
    /// Adding to a full list, adding a member, or removing a non-member
    /// leaves the list unchanged. Returns whether the list changed.
    pub fn toggle(&mut self, id: ProductId, desired: bool) -> bool {
        if desired {
            if self.contains(id) || self.is_full() {
                return false;
            }
            self.ids.push(id);
            true
        } else {
            self.remove(id)
        }
    }

    /// Remove a member. Returns whether it was present.
    pub fn remove(&mut self, id: ProductId) -> bool {
        let len_before = self.ids.len();
        self.ids.retain(|&i| i != id);
        self.ids.len() < len_before
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.ids.contains(&id)
    }

    pub fn is_full(&self) -> bool {
        self.ids.len() >= self.capacity
    }

    pub fn ids(&self) -> &[ProductId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for CompareList {
    fn default() -> Self {
        Self::new(COMPARE_CAPACITY)
    }
}

/// Side-by-side view of the compared products.
///
/// Products appear in catalog order regardless of when they were added.
#[derive(Debug, Clone)]
pub struct CompareTray<'a> {
    products: Vec<&'a Product>,
    capacity: usize,
}

impl<'a> CompareTray<'a> {
    /// Resolve the compare list against the catalog.
    pub fn project(catalog: &'a Catalog, list: &CompareList) -> Self {
        let products = catalog
            .products()
            .iter()
            .map(|p| p.as_ref())
            .filter(|p| list.contains(p.id))
            .collect();
        Self {
            products,
            capacity: list.capacity(),
        }
    }

    pub fn products(&self) -> &[&'a Product] {
        &self.products
    }

    pub fn ids(&self) -> Vec<ProductId> {
        self.products.iter().map(|p| p.id).collect()
    }

    /// Whether to invite the shopper to add more products.
    pub fn show_hint(&self) -> bool {
        self.products.len() < self.capacity
    }

    /// Hint text shown below a tray that is not yet full.
    pub fn hint(&self) -> Option<String> {
        self.show_hint().then(|| {
            format!(
                "You can compare up to {} products at once. Add more products to compare.",
                self.capacity
            )
        })
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
