//! The storefront session facade.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::card::ProductCard;
use crate::catalog::{Catalog, Product};
use crate::ids::{ProductId, SessionId};
use crate::search::{project, CategoryFilter, SortKey};
use crate::selection::{CartLine, CompareTray, SelectionEvent, SelectionStore};
use crate::settings::{StorefrontSettings, Theme};
use crate::storefront::{CompareTraySnapshot, Intent, Notification, Snapshot};
use crate::toast::{Toast, ToastEmitter, ADDED_TO_CART_MESSAGE};

/// One shopper's storefront.
///
/// Owns the catalog, the filter and sort, one card per visible product,
/// the selection store, the toast slot and the session clock. Intents are
/// applied with [`Storefront::dispatch`] and time moves only through
/// [`Storefront::advance`].
#[derive(Debug, Clone)]
pub struct Storefront {
    session_id: SessionId,
    catalog: Catalog,
    theme: Theme,
    settings: StorefrontSettings,
    filter: CategoryFilter,
    sort: SortKey,
    cards: Vec<ProductCard>,
    store: SelectionStore,
    toasts: ToastEmitter,
    now: Duration,
    projections: u64,
}

impl Storefront {
    pub fn new(catalog: Catalog, theme: Theme, settings: StorefrontSettings) -> Self {
        let mut storefront = Self {
            session_id: SessionId::generate(),
            store: SelectionStore::new(&settings),
            toasts: ToastEmitter::new(settings.toast_duration()),
            catalog,
            theme,
            settings,
            filter: CategoryFilter::All,
            sort: SortKey::Featured,
            cards: Vec::new(),
            now: Duration::ZERO,
            projections: 0,
        };
        storefront.reproject();
        storefront
    }

    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = session_id;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    pub fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    /// Current session clock.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of times the product list has been recomputed.
    pub fn projection_count(&self) -> u64 {
        self.projections
    }

    /// The projected product list, in display order.
    pub fn visible_products(&self) -> Vec<&Product> {
        self.cards.iter().map(|c| c.product().as_ref()).collect()
    }

    pub fn visible_ids(&self) -> Vec<ProductId> {
        self.cards.iter().map(ProductCard::product_id).collect()
    }

    pub fn cards(&self) -> &[ProductCard] {
        &self.cards
    }

    pub fn card(&self, id: ProductId) -> Option<&ProductCard> {
        find_card(&self.cards, id)
    }

    pub fn store(&self) -> &SelectionStore {
        &self.store
    }

    pub fn compare_tray(&self) -> CompareTray<'_> {
        self.store.compare_products(&self.catalog)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toasts.current()
    }

    /// Apply one intent at the current time.
    ///
    /// The store mutation lands first; the product list and the toast are
    /// derived from the updated state afterwards.
    pub fn dispatch(&mut self, intent: Intent) -> Vec<Notification> {
        debug!(session_id = %self.session_id, kind = intent.kind(), at_ms = self.now_ms(), "dispatch");
        let mut notifications = Vec::new();
        let reprojects = intent.reprojects();

        match intent {
            Intent::FilterBy { category } => self.filter = category,
            Intent::SortBy { sort } => self.sort = sort,
            Intent::ToggleWishlist { product_id } => match find_card(&self.cards, product_id) {
                Some(card) => {
                    card.toggle_wishlist(&mut self.store);
                }
                None => {
                    self.store.toggle_wishlist(product_id);
                }
            },
            Intent::AddToCart {
                product_id,
                quantity,
                color,
                size,
            } => match find_card(&self.cards, product_id) {
                Some(card) => card.add_to_cart(&mut self.store, quantity, color, size),
                None => {
                    let mut line = CartLine::new(product_id).with_quantity(quantity);
                    line.color = color;
                    line.size = size;
                    self.store.add_to_cart(line);
                }
            },
            Intent::ToggleCompare { product_id, desired } => match find_card(&self.cards, product_id) {
                Some(card) => {
                    card.toggle_compare(&mut self.store, desired);
                }
                None => {
                    self.store.toggle_compare(product_id, desired);
                }
            },
            Intent::RemoveFromCompare { product_id } => {
                self.store.remove_from_compare(product_id);
            }
            Intent::OpenQuickView { product_id } => match find_card(&self.cards, product_id) {
                Some(card) => card.open_quick_view(&mut self.store, self.now),
                None => match self.catalog.get(product_id) {
                    Some(product) => {
                        let product = Arc::clone(product);
                        self.store.open_quick_view(product, self.now);
                    }
                    None => warn!(%product_id, "quick view requested for unknown product"),
                },
            },
            Intent::CloseQuickView => {
                self.store.close_quick_view();
            }
            Intent::SelectColor { name } => {
                self.store.select_color(&name);
            }
            Intent::SelectSize { size } => {
                self.store.select_size(&size);
            }
            Intent::SetQuantity { quantity } => {
                self.store.set_quantity(quantity);
            }
            Intent::IncrementQuantity => {
                if let Some(view) = self.store.quick_view_mut() {
                    view.increment_quantity();
                }
            }
            Intent::DecrementQuantity => {
                if let Some(view) = self.store.quick_view_mut() {
                    view.decrement_quantity();
                }
            }
            Intent::NextImage => {
                if let Some(view) = self.store.quick_view_mut() {
                    view.next_image();
                }
            }
            Intent::PreviousImage => {
                if let Some(view) = self.store.quick_view_mut() {
                    view.previous_image();
                }
            }
            Intent::ShowImage { index } => {
                if let Some(view) = self.store.quick_view_mut() {
                    view.show_image(index);
                }
            }
            Intent::ConfirmAddToCart => {
                self.store.confirm_add_to_cart();
            }
            Intent::PointerEnter { product_id } => {
                let now = self.now;
                if let Some(card) = self.card_mut(product_id) {
                    card.pointer_enter(now);
                }
            }
            Intent::PointerLeave { product_id } => {
                if let Some(card) = self.card_mut(product_id) {
                    card.pointer_leave();
                }
            }
            Intent::PointerMove { product_id, x, y } => {
                if let Some(card) = self.card_mut(product_id) {
                    card.pointer_move(x, y);
                }
            }
            Intent::ScrolledIntoView { product_id } => {
                let now = self.now;
                if let Some(card) = self.card_mut(product_id) {
                    card.scrolled_into_view(now);
                }
            }
            Intent::DismissToast => {
                if self.toasts.dismiss() {
                    notifications.push(Notification::ToastDismissed);
                }
            }
        }

        self.flush_store_events(&mut notifications);
        if reprojects {
            self.reproject();
        }
        notifications
    }

    /// Move the session clock forward and fire every timer that came due.
    pub fn advance(&mut self, dt: Duration) -> Vec<Notification> {
        self.now += dt;
        let now = self.now;
        trace!(session_id = %self.session_id, at_ms = self.now_ms(), "advance");

        self.store.tick(now);
        for card in &mut self.cards {
            card.tick(now);
        }

        let mut notifications = Vec::new();
        if self.toasts.tick(now).is_some() {
            notifications.push(Notification::ToastDismissed);
        }
        notifications
    }

    /// Advance to an absolute time. Earlier times are ignored.
    pub fn advance_to(&mut self, at: Duration) -> Vec<Notification> {
        match at.checked_sub(self.now) {
            Some(dt) if !dt.is_zero() => self.advance(dt),
            _ => Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        let tray = self.compare_tray();
        Snapshot {
            at_ms: self.now_ms(),
            theme: self.theme,
            filter: self.filter.clone(),
            sort: self.sort,
            visible: self.visible_ids(),
            selection: self.store.snapshot(),
            compare_tray: CompareTraySnapshot {
                products: tray.ids(),
                show_hint: tray.show_hint(),
            },
            toast: self.toasts.current().cloned(),
            cards: self.cards.iter().map(|c| c.snapshot(&self.store)).collect(),
        }
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.now.as_millis()).unwrap_or(u64::MAX)
    }

    fn card_mut(&mut self, id: ProductId) -> Option<&mut ProductCard> {
        let card = self.cards.iter_mut().find(|c| c.product_id() == id);
        if card.is_none() {
            warn!(product_id = %id, "card intent for a product that is not displayed");
        }
        card
    }

    fn flush_store_events(&mut self, notifications: &mut Vec<Notification>) {
        for event in self.store.drain_events() {
            match event {
                SelectionEvent::AddedToCart { .. } => {
                    let toast = self.toasts.show(ADDED_TO_CART_MESSAGE, self.now);
                    notifications.push(Notification::ToastShown {
                        message: toast.message,
                        duration_ms: toast.duration_ms,
                    });
                }
            }
        }
    }

    /// Recompute the product list and reconcile cards with it.
    ///
    /// Cards that stay visible keep their hover and reveal state; cards
    /// that leave the list are dropped along with their timers.
    fn reproject(&mut self) {
        let ids: Vec<ProductId> = project(&self.catalog, &self.filter, self.sort)
            .iter()
            .map(|p| p.id)
            .collect();

        let mut previous = std::mem::take(&mut self.cards);
        let mut cards = Vec::with_capacity(ids.len());
        for (index, id) in ids.into_iter().enumerate() {
            let existing = previous
                .iter()
                .position(|c| c.product_id() == id)
                .map(|pos| previous.swap_remove(pos));
            let card = match existing {
                Some(mut card) => {
                    card.set_index(index);
                    card
                }
                None => match self.catalog.get(id) {
                    Some(product) => ProductCard::new(Arc::clone(product), index, &self.settings),
                    None => continue,
                },
            };
            cards.push(card);
        }

        self.projections += 1;
        debug!(
            session_id = %self.session_id,
            filter = %self.filter,
            sort = %self.sort,
            visible = cards.len(),
            retired = previous.len(),
            "catalog reprojected"
        );
        self.cards = cards;
    }
}

/// The displayed card for `id`, if any. Store intents for a displayed
/// product go through its card.
fn find_card(cards: &[ProductCard], id: ProductId) -> Option<&ProductCard> {
    cards.iter().find(|c| c.product_id() == id)
}
