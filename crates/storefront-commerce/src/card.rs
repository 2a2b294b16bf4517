//! Product card controller.
//!
//! A card owns only presentation state: hover, the cycling image, tilt
//! and the entrance reveal. Wishlist, compare and cart state live in the
//! [`SelectionStore`]; the card's intent methods call into it.

use std::sync::Arc;
use std::time::Duration;

use tracing::trace;

use crate::catalog::Product;
use crate::ids::ProductId;
use crate::selection::{CartLine, SelectionStore};
use crate::settings::StorefrontSettings;
use crate::timer::{Deadline, Interval};
use serde::{Deserialize, Serialize};

/// Maximum tilt in degrees at the card edges.
const TILT_RANGE_DEG: f64 = 10.0;

/// Perspective tilt in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Tilt {
    /// Rotation about the horizontal axis, driven by vertical pointer position.
    pub x: f64,
    /// Rotation about the vertical axis, driven by horizontal pointer position.
    pub y: f64,
}

impl Tilt {
    /// Tilt for a pointer at `(rel_x, rel_y)` within the card, each in 0..=1.
    pub fn from_pointer(rel_x: f64, rel_y: f64) -> Self {
        Self {
            x: (rel_y - 0.5) * TILT_RANGE_DEG,
            y: (rel_x - 0.5) * TILT_RANGE_DEG,
        }
    }
}

/// One card in the grid.
#[derive(Debug, Clone)]
pub struct ProductCard {
    product: Arc<Product>,
    index: usize,
    image_cycle_period: Duration,
    reveal_stagger: Duration,
    hovered: bool,
    image_index: usize,
    image_cycle: Option<Interval>,
    tilt: Tilt,
    visible: bool,
    reveal: Option<Deadline>,
}

impl ProductCard {
    pub fn new(product: Arc<Product>, index: usize, settings: &StorefrontSettings) -> Self {
        Self {
            product,
            index,
            image_cycle_period: settings.image_cycle(),
            reveal_stagger: settings.reveal_stagger(),
            hovered: false,
            image_index: 0,
            image_cycle: None,
            tilt: Tilt::default(),
            visible: false,
            reveal: None,
        }
    }

    pub fn product(&self) -> &Arc<Product> {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Position in the current grid.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Move the card to a new grid position. A reveal already scheduled
    /// keeps its original delay.
    pub fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn current_image(&self) -> Option<&str> {
        self.product.images.get(self.image_index).map(String::as_str)
    }

    pub fn tilt(&self) -> Tilt {
        self.tilt
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether the price shows its hover flip animation.
    pub fn shows_price_flip(&self) -> bool {
        self.hovered
    }

    /// Start hovering. Products with several images begin cycling them.
    pub fn pointer_enter(&mut self, now: Duration) {
        if self.hovered {
            return;
        }
        self.hovered = true;
        if self.product.images.len() > 1 {
            self.image_cycle = Some(Interval::start(now, self.image_cycle_period));
        }
    }

    /// Stop hovering: back to the cover image, no tilt.
    pub fn pointer_leave(&mut self) {
        self.hovered = false;
        self.image_cycle = None;
        self.image_index = 0;
        self.tilt = Tilt::default();
    }

    pub fn pointer_move(&mut self, rel_x: f64, rel_y: f64) {
        self.tilt = Tilt::from_pointer(rel_x, rel_y);
    }

    /// The card entered the viewport. Only the first call schedules the
    /// reveal; once visible a card stays visible.
    pub fn scrolled_into_view(&mut self, now: Duration) {
        if self.visible || self.reveal.is_some() {
            return;
        }
        let delay = self
            .reveal_stagger
            .saturating_mul(u32::try_from(self.index).unwrap_or(u32::MAX));
        self.reveal = Some(Deadline::after(now, delay));
        self.tick(now);
    }

    /// Drive the card's timers to `now`. Returns whether anything visible changed.
    pub fn tick(&mut self, now: Duration) -> bool {
        let mut changed = false;

        if let Some(cycle) = self.image_cycle.as_mut() {
            let fired = cycle.poll(now) as usize;
            if fired > 0 {
                let count = self.product.images.len();
                self.image_index = (self.image_index + fired) % count;
                trace!(product_id = %self.product.id, image_index = self.image_index, "card image advanced");
                changed = true;
            }
        }

        if self.reveal.is_some_and(|d| d.is_due(now)) {
            self.reveal = None;
            self.visible = true;
            trace!(product_id = %self.product.id, "card revealed");
            changed = true;
        }

        changed
    }

    pub fn toggle_wishlist(&self, store: &mut SelectionStore) -> bool {
        store.toggle_wishlist(self.product.id)
    }

    pub fn toggle_compare(&self, store: &mut SelectionStore, desired: bool) -> bool {
        store.toggle_compare(self.product.id, desired)
    }

    /// Add this product to the cart. A quick add is one unit with no options.
    pub fn add_to_cart(
        &self,
        store: &mut SelectionStore,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        let mut line = CartLine::new(self.product.id).with_quantity(quantity);
        line.color = color;
        line.size = size;
        store.add_to_cart(line);
    }

    pub fn open_quick_view(&self, store: &mut SelectionStore, now: Duration) {
        store.open_quick_view(Arc::clone(&self.product), now);
    }

    /// Presentation state merged with the store's flags for this product.
    pub fn snapshot(&self, store: &SelectionStore) -> CardSnapshot {
        CardSnapshot {
            product_id: self.product.id,
            index: self.index,
            visible: self.visible,
            hovered: self.hovered,
            image_index: self.image_index,
            tilt: self.tilt,
            price_flip: self.shows_price_flip(),
            wished: store.is_wished(self.product.id),
            compared: store.is_compared(self.product.id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub product_id: ProductId,
    pub index: usize,
    pub visible: bool,
    pub hovered: bool,
    pub image_index: usize,
    pub tilt: Tilt,
    pub price_flip: bool,
    pub wished: bool,
    pub compared: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price::Price;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn card(images: usize, index: usize) -> ProductCard {
        let product = Product::new(1, "Lamp", "home", Price::new(4999))
            .with_images((0..images).map(|i| format!("/lamp-{}.jpg", i)));
        ProductCard::new(Arc::new(product), index, &StorefrontSettings::default())
    }

    #[test]
    fn test_hover_cycles_images() {
        let mut card = card(3, 0);
        card.pointer_enter(ms(0));
        assert!(card.shows_price_flip());

        assert!(!card.tick(ms(1499)));
        assert!(card.tick(ms(1500)));
        assert_eq!(card.image_index(), 1);
        card.tick(ms(4500));
        assert_eq!(card.image_index(), 0);
    }

    #[test]
    fn test_leave_resets_and_halts() {
        let mut card = card(3, 0);
        card.pointer_enter(ms(0));
        card.pointer_move(1.0, 0.0);
        card.tick(ms(1500));
        card.pointer_leave();

        assert_eq!(card.image_index(), 0);
        assert_eq!(card.tilt(), Tilt::default());
        assert!(!card.shows_price_flip());
        assert!(!card.tick(ms(10_000)));
        assert_eq!(card.image_index(), 0);
    }

    #[test]
    fn test_single_image_does_not_cycle() {
        let mut card = card(1, 0);
        card.pointer_enter(ms(0));
        assert!(!card.tick(ms(5000)));
        assert_eq!(card.image_index(), 0);
    }

    #[test]
    fn test_tilt_from_pointer() {
        let tilt = Tilt::from_pointer(1.0, 0.25);
        assert_eq!(tilt.x, -2.5);
        assert_eq!(tilt.y, 5.0);
        assert_eq!(Tilt::from_pointer(0.5, 0.5), Tilt::default());
    }

    #[test]
    fn test_reveal_is_staggered_and_one_way() {
        let mut card = card(1, 3);
        card.scrolled_into_view(ms(1000));
        assert!(!card.is_visible());
        card.tick(ms(1299));
        assert!(!card.is_visible());
        card.tick(ms(1300));
        assert!(card.is_visible());

        card.scrolled_into_view(ms(2000));
        assert!(card.is_visible());
    }

    #[test]
    fn test_first_card_reveals_immediately() {
        let mut card = card(1, 0);
        card.scrolled_into_view(ms(0));
        assert!(card.is_visible());
    }

    #[test]
    fn test_intents_go_to_store() {
        let card = card(2, 0);
        let mut store = SelectionStore::default();

        assert!(card.toggle_wishlist(&mut store));
        assert!(card.toggle_compare(&mut store, true));
        card.add_to_cart(&mut store, 1, None, None);
        card.open_quick_view(&mut store, ms(0));

        let snapshot = card.snapshot(&store);
        assert!(snapshot.wished);
        assert!(snapshot.compared);
        assert_eq!(store.cart().lines(), &[CartLine::new(ProductId::new(1))]);
        assert_eq!(store.quick_view().unwrap().product().id, ProductId::new(1));
    }
}
