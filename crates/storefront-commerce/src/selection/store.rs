//! The selection state store.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::catalog::{Catalog, Product};
use crate::ids::ProductId;
use crate::quick_view::{QuickView, QuickViewSelection, TimeLeft};
use crate::selection::{Cart, CartLine, CompareList, CompareTray};
use crate::settings::StorefrontSettings;
use serde::{Deserialize, Serialize};

/// Side effects produced by store operations, drained by the owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    AddedToCart { line: CartLine },
}

/// Everything the shopper has picked during a session.
///
/// Every operation is total: invalid requests leave the state unchanged
/// instead of failing.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    wishlist: Vec<ProductId>,
    cart: Cart,
    compare: CompareList,
    quick_view: Option<QuickView>,
    countdown_tick: Duration,
    events: Vec<SelectionEvent>,
}

impl SelectionStore {
    pub fn new(settings: &StorefrontSettings) -> Self {
        Self {
            wishlist: Vec::new(),
            cart: Cart::new(),
            compare: CompareList::new(settings.compare_capacity),
            quick_view: None,
            countdown_tick: settings.countdown_tick(),
            events: Vec::new(),
        }
    }

    // Wishlist

    /// Flip wishlist membership. Returns whether the product is now wished.
    pub fn toggle_wishlist(&mut self, id: ProductId) -> bool {
        let wished = if let Some(pos) = self.wishlist.iter().position(|&w| w == id) {
            self.wishlist.remove(pos);
            false
        } else {
            self.wishlist.push(id);
            true
        };
        debug!(product_id = %id, wished, "wishlist toggled");
        wished
    }

    pub fn is_wished(&self, id: ProductId) -> bool {
        self.wishlist.contains(&id)
    }

    pub fn wishlist(&self) -> &[ProductId] {
        &self.wishlist
    }

    // Cart

    /// Append a cart line. Never fails, even for products out of stock.
    pub fn add_to_cart(&mut self, line: CartLine) {
        debug!(
            product_id = %line.product_id,
            quantity = line.quantity,
            color = line.color.as_deref().unwrap_or(""),
            size = line.size.as_deref().unwrap_or(""),
            "added to cart"
        );
        self.cart.add(line.clone());
        self.events.push(SelectionEvent::AddedToCart { line });
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    // Compare

    /// Set compare membership. Adding past capacity is ignored.
    pub fn toggle_compare(&mut self, id: ProductId, desired: bool) -> bool {
        let changed = self.compare.toggle(id, desired);
        if desired && !changed && !self.compare.contains(id) {
            debug!(product_id = %id, capacity = self.compare.capacity(), "compare list full");
        } else {
            debug!(product_id = %id, desired, changed, "compare toggled");
        }
        changed
    }

    pub fn remove_from_compare(&mut self, id: ProductId) -> bool {
        let removed = self.compare.remove(id);
        debug!(product_id = %id, removed, "removed from compare");
        removed
    }

    pub fn is_compared(&self, id: ProductId) -> bool {
        self.compare.contains(id)
    }

    pub fn compare_list(&self) -> &CompareList {
        &self.compare
    }

    /// The compare tray, in catalog order.
    pub fn compare_products<'a>(&self, catalog: &'a Catalog) -> CompareTray<'a> {
        CompareTray::project(catalog, &self.compare)
    }

    // Quick view

    /// Open the modal on a product, replacing any open one and resetting
    /// the selection.
    pub fn open_quick_view(&mut self, product: Arc<Product>, now: Duration) {
        debug!(product_id = %product.id, "quick view opened");
        self.quick_view = Some(QuickView::open(product, now, self.countdown_tick));
    }

    pub fn close_quick_view(&mut self) -> bool {
        let was_open = self.quick_view.take().is_some();
        if was_open {
            debug!("quick view closed");
        }
        was_open
    }

    pub fn quick_view(&self) -> Option<&QuickView> {
        self.quick_view.as_ref()
    }

    pub fn quick_view_mut(&mut self) -> Option<&mut QuickView> {
        self.quick_view.as_mut()
    }

    pub fn select_color(&mut self, name: &str) -> bool {
        self.quick_view.as_mut().is_some_and(|v| v.select_color(name))
    }

    pub fn select_size(&mut self, size: &str) -> bool {
        self.quick_view.as_mut().is_some_and(|v| v.select_size(size))
    }

    /// Clamp and store the modal quantity. `None` when no modal is open.
    pub fn set_quantity(&mut self, quantity: i64) -> Option<u32> {
        self.quick_view.as_mut().map(|v| v.set_quantity(quantity))
    }

    /// Add the modal's selection to the cart and close it.
    pub fn confirm_add_to_cart(&mut self) -> bool {
        let Some(view) = self.quick_view.take() else {
            return false;
        };
        self.add_to_cart(view.cart_line());
        debug!("quick view closed after add to cart");
        true
    }

    /// Drive store-owned timers to `now`.
    pub fn tick(&mut self, now: Duration) -> bool {
        self.quick_view.as_mut().is_some_and(|v| v.tick(now))
    }

    /// Take the side effects produced since the last drain.
    pub fn drain_events(&mut self) -> Vec<SelectionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        SelectionSnapshot {
            wishlist: self.wishlist.clone(),
            cart: self.cart.lines().to_vec(),
            compare: self.compare.ids().to_vec(),
            quick_view: self.quick_view.as_ref().map(QuickViewSnapshot::from),
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new(&StorefrontSettings::default())
    }
}

/// Serializable copy of the selection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSnapshot {
    pub wishlist: Vec<ProductId>,
    pub cart: Vec<CartLine>,
    /// Insertion order.
    pub compare: Vec<ProductId>,
    pub quick_view: Option<QuickViewSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickViewSnapshot {
    pub product_id: ProductId,
    pub selection: QuickViewSelection,
    pub image_index: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_left: Option<TimeLeft>,
}

impl From<&QuickView> for QuickViewSnapshot {
    fn from(view: &QuickView) -> Self {
        Self {
            product_id: view.product().id,
            selection: view.selection().clone(),
            image_index: view.image_index(),
            time_left: view.time_left(),
        }
    }
}
