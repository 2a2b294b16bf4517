//! The open quick-view modal.

use std::sync::Arc;
use std::time::Duration;

use crate::catalog::{ColorOption, Product};
use crate::quick_view::{Countdown, TimeLeft};
use crate::selection::CartLine;
use serde::{Deserialize, Serialize};

/// Option picks made inside the modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickViewSelection {
    /// First color's name on open, empty when the product has no colors.
    pub selected_color: String,
    /// First size on open, empty when the product has no sizes.
    pub selected_size: String,
    /// Always within `[1, max(stock, 1)]`.
    pub quantity: u32,
}

impl QuickViewSelection {
    /// The selection a fresh modal starts with.
    pub fn initial(product: &Product) -> Self {
        Self {
            selected_color: product
                .colors
                .first()
                .map(|c| c.name.clone())
                .unwrap_or_default(),
            selected_size: product.sizes.first().cloned().unwrap_or_default(),
            quantity: 1,
        }
    }
}

/// Detail view of one product with its option selection.
///
/// Exists only while the modal is open; closing drops it along with its
/// countdown ticker.
#[derive(Debug, Clone)]
pub struct QuickView {
    product: Arc<Product>,
    selection: QuickViewSelection,
    image_index: usize,
    countdown: Option<Countdown>,
}

impl QuickView {
    pub fn open(product: Arc<Product>, now: Duration, countdown_tick: Duration) -> Self {
        let countdown = product
            .offer_ends_in
            .map(|ms| Countdown::start(now, ms, countdown_tick));
        Self {
            selection: QuickViewSelection::initial(&product),
            product,
            image_index: 0,
            countdown,
        }
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn selection(&self) -> &QuickViewSelection {
        &self.selection
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn current_image(&self) -> Option<&str> {
        self.product.images.get(self.image_index).map(String::as_str)
    }

    /// Largest quantity the stepper allows.
    pub fn max_quantity(&self) -> u32 {
        self.product.stock.max(1)
    }

    /// Pick a color by name. Unknown names are ignored.
    ///
    /// Every pick of a known color, the current one included, moves the
    /// displayed image to the image at the color's position when one
    /// exists. Returns whether the selected color changed.
    pub fn select_color(&mut self, name: &str) -> bool {
        let Some(position) = self.product.color_position(name) else {
            return false;
        };
        if position < self.product.images.len() {
            self.image_index = position;
        }
        if self.selection.selected_color == name {
            return false;
        }
        self.selection.selected_color = name.to_string();
        true
    }

    /// Pick a size. Sizes the product does not offer are ignored.
    pub fn select_size(&mut self, size: &str) -> bool {
        if !self.product.has_size(size) || self.selection.selected_size == size {
            return false;
        }
        self.selection.selected_size = size.to_string();
        true
    }

    /// Set the quantity, clamped into range. Returns the stored value.
    pub fn set_quantity(&mut self, requested: i64) -> u32 {
        let max = i64::from(self.max_quantity());
        let clamped = requested.clamp(1, max);
        self.selection.quantity = u32::try_from(clamped).unwrap_or(1);
        self.selection.quantity
    }

    pub fn increment_quantity(&mut self) -> u32 {
        self.set_quantity(i64::from(self.selection.quantity) + 1)
    }

    pub fn decrement_quantity(&mut self) -> u32 {
        self.set_quantity(i64::from(self.selection.quantity) - 1)
    }

    pub fn next_image(&mut self) {
        let count = self.product.images.len().max(1);
        self.image_index = (self.image_index + 1) % count;
    }

    pub fn previous_image(&mut self) {
        let count = self.product.images.len().max(1);
        self.image_index = (self.image_index + count - 1) % count;
    }

    /// Jump to a thumbnail. Out-of-range indices are ignored.
    pub fn show_image(&mut self, index: usize) -> bool {
        if index >= self.product.images.len() {
            return false;
        }
        self.image_index = index;
        true
    }

    /// The full record of the selected color, if any.
    pub fn selected_color_option(&self) -> Option<&ColorOption> {
        self.product
            .colors
            .iter()
            .find(|c| c.name == self.selection.selected_color)
    }

    /// The cart line the "Add to Cart" button would append.
    pub fn cart_line(&self) -> CartLine {
        let mut line = CartLine::new(self.product.id).with_quantity(self.selection.quantity);
        if !self.selection.selected_color.is_empty() {
            line = line.with_color(self.selection.selected_color.clone());
        }
        if !self.selection.selected_size.is_empty() {
            line = line.with_size(self.selection.selected_size.clone());
        }
        line
    }

    pub fn tick(&mut self, now: Duration) -> bool {
        self.countdown.as_mut().is_some_and(|c| c.tick(now))
    }

    /// Remaining offer time, when the product has an offer.
    pub fn time_left(&self) -> Option<TimeLeft> {
        self.countdown.as_ref().map(Countdown::time_left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn speaker() -> Arc<Product> {
        Arc::new(
            Product::new(7, "Speaker", "electronics", Price::new(5999))
                .with_images(["/a.jpg", "/b.jpg"])
                .with_colors(vec![
                    ColorOption::new("Red", "#f00", "/red.jpg"),
                    ColorOption::new("Teal", "#0ff", "/teal.jpg"),
                    ColorOption::new("Sand", "#ddc", "/sand.jpg"),
                ])
                .with_sizes(["S", "M"])
                .with_stock(10, 20)
                .with_offer_ends_in(3_600_000),
        )
    }

    #[test]
    fn test_open_resets_selection() {
        let view = QuickView::open(speaker(), ms(0), ms(1000));
        assert_eq!(view.selection().selected_color, "Red");
        assert_eq!(view.selection().selected_size, "S");
        assert_eq!(view.selection().quantity, 1);
        assert_eq!(view.image_index(), 0);
    }

    #[test]
    fn test_empty_options_select_empty_strings() {
        let plain = Arc::new(Product::new(1, "Plain", "x", Price::new(100)));
        let view = QuickView::open(plain, ms(0), ms(1000));
        assert_eq!(view.selection().selected_color, "");
        assert_eq!(view.selection().selected_size, "");
        assert!(view.time_left().is_none());
        assert_eq!(view.cart_line(), CartLine::new(1.into()));
    }

    #[test]
    fn test_quantity_clamps_to_stock() {
        let mut view = QuickView::open(speaker(), ms(0), ms(1000));
        assert_eq!(view.set_quantity(0), 1);
        assert_eq!(view.set_quantity(-5), 1);
        assert_eq!(view.set_quantity(999), 10);
        assert_eq!(view.increment_quantity(), 10);
        assert_eq!(view.decrement_quantity(), 9);
    }

    #[test]
    fn test_out_of_stock_quantity_stays_at_one() {
        let sold_out = Arc::new(Product::new(2, "Gone", "x", Price::new(100)).with_stock(0, 10));
        let mut view = QuickView::open(sold_out, ms(0), ms(1000));
        assert_eq!(view.set_quantity(5), 1);
        assert_eq!(view.increment_quantity(), 1);
    }

    #[test]
    fn test_select_color_moves_to_aligned_image() {
        let mut view = QuickView::open(speaker(), ms(0), ms(1000));
        assert!(view.select_color("Teal"));
        assert_eq!(view.image_index(), 1);
        assert_eq!(view.selected_color_option().unwrap().image, "/teal.jpg");

        // no image at position 2, index stays
        assert!(view.select_color("Sand"));
        assert_eq!(view.image_index(), 1);

        assert!(!view.select_color("Purple"));
        assert_eq!(view.selection().selected_color, "Sand");
    }

    #[test]
    fn test_reselecting_current_color_realigns_image() {
        let product = Arc::new(
            Product::new(8, "Lamp", "home", Price::new(2500))
                .with_images(["/a.jpg", "/b.jpg", "/c.jpg"])
                .with_colors(vec![
                    ColorOption::new("Red", "#f00", "/red.jpg"),
                    ColorOption::new("Teal", "#0ff", "/teal.jpg"),
                ])
                .with_stock(5, 10),
        );
        let mut view = QuickView::open(product, ms(0), ms(1000));
        view.next_image();
        view.next_image();
        assert_eq!(view.image_index(), 2);

        assert!(!view.select_color("Red"));
        assert_eq!(view.image_index(), 0);
        assert_eq!(view.selection().selected_color, "Red");

        view.next_image();
        assert!(!view.select_color("Purple"));
        assert_eq!(view.image_index(), 1);
    }

    #[test]
    fn test_select_size_requires_offered_size() {
        let mut view = QuickView::open(speaker(), ms(0), ms(1000));
        assert!(view.select_size("M"));
        assert!(!view.select_size("XL"));
        assert_eq!(view.selection().selected_size, "M");
    }

    #[test]
    fn test_image_navigation_wraps() {
        let mut view = QuickView::open(speaker(), ms(0), ms(1000));
        view.previous_image();
        assert_eq!(view.image_index(), 1);
        view.next_image();
        assert_eq!(view.image_index(), 0);
        assert!(!view.show_image(5));
        assert!(view.show_image(1));
        assert_eq!(view.current_image(), Some("/b.jpg"));
    }

    #[test]
    fn test_cart_line_carries_selection() {
        let mut view = QuickView::open(speaker(), ms(0), ms(1000));
        view.set_quantity(2);
        view.select_size("M");
        let line = view.cart_line();
        assert_eq!(line.quantity, 2);
        assert_eq!(line.color.as_deref(), Some("Red"));
        assert_eq!(line.size.as_deref(), Some("M"));
    }

    #[test]
    fn test_countdown_runs_on_session_clock() {
        let mut view = QuickView::open(speaker(), ms(500), ms(1000));
        assert_eq!(view.time_left().unwrap().hours, 1);
        assert!(view.tick(ms(1500)));
        let left = view.time_left().unwrap();
        assert_eq!((left.hours, left.minutes, left.seconds), (0, 59, 59));
    }
}
