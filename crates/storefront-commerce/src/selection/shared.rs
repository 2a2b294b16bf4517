//! Thread-safe handle to a selection store.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::ids::ProductId;
use crate::selection::{CartLine, SelectionEvent, SelectionSnapshot, SelectionStore};

/// A selection store shared between threads.
///
/// Every operation takes the lock once, so each one is atomic with
/// respect to the others. A poisoned lock is recovered: store operations
/// never leave the state half-applied.
#[derive(Debug, Clone, Default)]
pub struct SharedSelection {
    inner: Arc<Mutex<SelectionStore>>,
}

impl SharedSelection {
    pub fn new(store: SelectionStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SelectionStore> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Run several operations under one lock acquisition.
    pub fn with<R>(&self, f: impl FnOnce(&mut SelectionStore) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn toggle_wishlist(&self, id: ProductId) -> bool {
        self.lock().toggle_wishlist(id)
    }

    pub fn add_to_cart(&self, line: CartLine) {
        self.lock().add_to_cart(line)
    }

    pub fn toggle_compare(&self, id: ProductId, desired: bool) -> bool {
        self.lock().toggle_compare(id, desired)
    }

    pub fn remove_from_compare(&self, id: ProductId) -> bool {
        self.lock().remove_from_compare(id)
    }

    pub fn drain_events(&self) -> Vec<SelectionEvent> {
        self.lock().drain_events()
    }

    pub fn snapshot(&self) -> SelectionSnapshot {
        self.lock().snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_concurrent_compare_respects_capacity() {
        let shared = SharedSelection::default();
        let handles: Vec<_> = (1..=16)
            .map(|v| {
                let shared = shared.clone();
                thread::spawn(move || shared.toggle_compare(ProductId::new(v), true))
            })
            .collect();

        let added = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|&added| added)
            .count();

        assert_eq!(added, 4);
        assert_eq!(shared.snapshot().compare.len(), 4);
    }

    #[test]
    fn test_concurrent_cart_adds_are_all_kept() {
        let shared = SharedSelection::default();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || shared.add_to_cart(CartLine::new(ProductId::new(1))))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.with(|store| store.cart().len()), 8);
        assert_eq!(shared.drain_events().len(), 8);
    }
}
