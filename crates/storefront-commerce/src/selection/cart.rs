//! Cart lines.

use crate::catalog::Catalog;
use crate::ids::ProductId;
use crate::price::Price;
use serde::{Deserialize, Serialize};

/// One add-to-cart action.
///
/// Lines are never merged: adding the same product twice yields two lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    /// Units added, at least 1.
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
}

impl CartLine {
    /// A single unit with no options, as added from a product card.
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
            color: None,
            size: None,
        }
    }

    /// Set the quantity; zero is raised to 1.
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }
}

/// The shopper's cart: an ordered multiset of lines.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line.
    pub fn add(&mut self, line: CartLine) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines (the cart badge count).
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Total units of one product.
    pub fn quantity_of(&self, product_id: ProductId) -> u64 {
        self.lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .map(|l| u64::from(l.quantity))
            .sum()
    }

    /// Sum of line prices at current catalog prices.
    ///
    /// Lines for products missing from the catalog are skipped. Returns
    /// None on arithmetic overflow.
    pub fn subtotal(&self, catalog: &Catalog) -> Option<Price> {
        let line_totals: Option<Vec<Price>> = self
            .lines
            .iter()
            .filter_map(|line| {
                catalog
                    .get(line.product_id)
                    .map(|p| p.price.try_multiply(i64::from(line.quantity)))
            })
            .collect();
        Price::try_sum(line_totals?.iter())
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    #[test]
    fn test_lines_are_not_merged() {
        let mut cart = Cart::new();
        cart.add(CartLine::new(ProductId::new(1)));
        cart.add(CartLine::new(ProductId::new(1)).with_quantity(3));

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 4);
        assert_eq!(cart.quantity_of(ProductId::new(1)), 4);
        assert_eq!(cart.quantity_of(ProductId::new(2)), 0);
    }

    #[test]
    fn test_zero_quantity_is_raised() {
        let line = CartLine::new(ProductId::new(1)).with_quantity(0);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_subtotal() {
        let catalog = Catalog::new(vec![
            Product::new(1, "A", "x", Price::new(1000)),
            Product::new(2, "B", "x", Price::new(2500)),
        ])
        .unwrap();

        let mut cart = Cart::new();
        cart.add(CartLine::new(ProductId::new(1)).with_quantity(2));
        cart.add(CartLine::new(ProductId::new(2)));
        cart.add(CartLine::new(ProductId::new(99)));

        assert_eq!(cart.subtotal(&catalog), Some(Price::new(4500)));
    }

    #[test]
    fn test_line_json_omits_missing_options() {
        let json = serde_json::to_string(&CartLine::new(ProductId::new(3))).unwrap();
        assert_eq!(json, r#"{"product_id":3,"quantity":1}"#);
    }
}
