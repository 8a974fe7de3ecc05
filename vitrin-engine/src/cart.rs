//! Cart Engine - mutable cart line items and derived totals
//!
//! Owns the set of cart lines (at most one per variant id) and
//! enforces the cart invariants. Every committed mutation is
//! persisted to the [`StateStore`] under the `cart` namespace and
//! then broadcast to subscribers.
//!
//! # Mutation Flow
//!
//! ```text
//! add / remove / update_quantity / toggle_selection / select_all / clear
//!     ├─ 1. Apply to in-memory lines (write lock)
//!     ├─ 2. Persist full snapshot (best-effort, warn on failure)
//!     └─ 3. Broadcast event (only when state observably changed)
//! ```
//!
//! Totals are recomputed from the lines on every call; there is no
//! cached total that could drift.

use crate::storage::{CART_NAMESPACE, StateStore};
use parking_lot::RwLock;
use rust_decimal::prelude::*;
use shared::models::{CartLine, Product, ProductVariant};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Committed cart mutations, broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    ItemAdded { variant_id: i64, quantity: u32 },
    ItemRemoved { variant_id: i64 },
    QuantityUpdated { variant_id: i64, quantity: u32 },
    SelectionToggled { variant_id: i64, is_selected: bool },
    SelectionSetAll { is_selected: bool },
    Cleared,
}

/// Cart engine handle
///
/// Cheap to clone; all clones share the same cart. The engine is the
/// sole mutator — readers get cloned snapshots, never the lock.
#[derive(Clone)]
pub struct CartEngine {
    lines: Arc<RwLock<Vec<CartLine>>>,
    store: StateStore,
    event_tx: broadcast::Sender<CartEvent>,
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("lines", &self.lines.read().len())
            .finish()
    }
}

impl CartEngine {
    /// Create the engine, restoring the persisted cart snapshot
    ///
    /// A missing snapshot starts the cart empty; a corrupt one is
    /// logged and also starts empty (never a fatal error). Once this
    /// returns, the engine is fully restored and readable.
    pub fn restore(store: StateStore) -> Self {
        let mut lines = match store.restore::<Vec<CartLine>>(CART_NAMESPACE) {
            Ok(Some(lines)) => {
                tracing::debug!(lines = lines.len(), "cart restored from snapshot");
                lines
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    namespace = CART_NAMESPACE,
                    error = %e,
                    "cart snapshot unreadable, starting empty"
                );
                Vec::new()
            }
        };

        // A snapshot from outside the engine (edited file, older
        // build) can carry duplicate variant ids or zero quantities;
        // enforce the line invariants at the boundary, keeping the
        // first line per variant
        let before = lines.len();
        let mut seen = std::collections::HashSet::new();
        lines.retain(|l| l.quantity >= 1 && seen.insert(l.variant_id));
        if lines.len() != before {
            tracing::warn!(
                namespace = CART_NAMESPACE,
                dropped = before - lines.len(),
                "pruned invalid lines from cart snapshot"
            );
        }

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            lines: Arc::new(RwLock::new(lines)),
            store,
            event_tx,
        }
    }

    /// Subscribe to committed mutations
    pub fn subscribe(&self) -> broadcast::Receiver<CartEvent> {
        self.event_tx.subscribe()
    }

    // ========== Mutations ==========

    /// Add `quantity` of a variant, merging into an existing line
    ///
    /// A line already holding this variant gets its quantity
    /// incremented; otherwise a new selected line is created with
    /// snapshots of the product and variant. Stock is deliberately
    /// not checked here — clamping against `variant.stock` is the
    /// caller's decision, made before this call. `quantity == 0` is
    /// a no-op.
    pub fn add(&self, product: &Product, variant: &ProductVariant, quantity: u32) {
        if quantity == 0 {
            return;
        }

        {
            let mut lines = self.lines.write();
            match lines.iter_mut().find(|l| l.variant_id == variant.id) {
                // Saturate rather than wrap; a wrapped sum could land
                // on 0 and break the quantity >= 1 invariant
                Some(line) => line.quantity = line.quantity.saturating_add(quantity),
                None => lines.push(CartLine::new(product, variant, quantity)),
            }
        }

        self.persist();
        self.emit(CartEvent::ItemAdded {
            variant_id: variant.id,
            quantity,
        });
    }

    /// Remove the line for a variant; no-op when absent
    pub fn remove(&self, variant_id: i64) {
        let removed = {
            let mut lines = self.lines.write();
            let before = lines.len();
            lines.retain(|l| l.variant_id != variant_id);
            lines.len() != before
        };

        if removed {
            self.persist();
            self.emit(CartEvent::ItemRemoved { variant_id });
        }
    }

    /// Set a line's quantity to exactly `quantity`
    ///
    /// `quantity == 0` removes the line (the invariant is
    /// `quantity >= 1`, enforced by removal rather than clamping).
    /// No-op when the variant is not in the cart.
    pub fn update_quantity(&self, variant_id: i64, quantity: u32) {
        if quantity < 1 {
            self.remove(variant_id);
            return;
        }

        let updated = {
            let mut lines = self.lines.write();
            match lines.iter_mut().find(|l| l.variant_id == variant_id) {
                Some(line) => {
                    line.quantity = quantity;
                    true
                }
                None => false,
            }
        };

        if updated {
            self.persist();
            self.emit(CartEvent::QuantityUpdated {
                variant_id,
                quantity,
            });
        }
    }

    /// Flip the checkout-selection flag of a line; no-op when absent
    pub fn toggle_selection(&self, variant_id: i64) {
        let toggled = {
            let mut lines = self.lines.write();
            lines.iter_mut().find(|l| l.variant_id == variant_id).map(|line| {
                line.is_selected = !line.is_selected;
                line.is_selected
            })
        };

        if let Some(is_selected) = toggled {
            self.persist();
            self.emit(CartEvent::SelectionToggled {
                variant_id,
                is_selected,
            });
        }
    }

    /// Set the selection flag uniformly on every line
    pub fn select_all(&self, is_selected: bool) {
        let changed = {
            let mut lines = self.lines.write();
            let mut changed = false;
            for line in lines.iter_mut() {
                changed |= line.is_selected != is_selected;
                line.is_selected = is_selected;
            }
            changed
        };

        if changed {
            self.persist();
            self.emit(CartEvent::SelectionSetAll { is_selected });
        }
    }

    /// Remove all lines
    pub fn clear(&self) {
        let cleared = {
            let mut lines = self.lines.write();
            let was_empty = lines.is_empty();
            lines.clear();
            !was_empty
        };

        if cleared {
            self.persist();
            self.emit(CartEvent::Cleared);
        }
    }

    // ========== Queries ==========

    /// Sum of quantities over all lines, saturating at `u32::MAX`
    pub fn item_count(&self) -> u32 {
        self.lines
            .read()
            .iter()
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of quantities over selected lines, saturating at `u32::MAX`
    pub fn selected_item_count(&self) -> u32 {
        self.lines
            .read()
            .iter()
            .filter(|l| l.is_selected)
            .fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    /// Sum of `price * quantity` over all lines
    pub fn total_price(&self) -> f64 {
        Self::total(&self.lines.read(), false)
    }

    /// Sum of `price * quantity` over selected lines (the checkout total)
    pub fn selected_total_price(&self) -> f64 {
        Self::total(&self.lines.read(), true)
    }

    pub fn contains(&self, variant_id: i64) -> bool {
        self.lines.read().iter().any(|l| l.variant_id == variant_id)
    }

    /// Snapshot of the current lines, in insertion order
    pub fn lines(&self) -> Vec<CartLine> {
        self.lines.read().clone()
    }

    pub fn len(&self) -> usize {
        self.lines.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.read().is_empty()
    }

    // ========== Internals ==========

    fn total(lines: &[CartLine], selected_only: bool) -> f64 {
        let mut total = Decimal::ZERO;
        for line in lines {
            if selected_only && !line.is_selected {
                continue;
            }
            let price = Decimal::from_f64(line.variant.price).unwrap_or_default();
            total += price * Decimal::from(line.quantity);
        }
        total
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .to_f64()
            .unwrap_or(0.0)
    }

    /// Best-effort durability write. On failure the in-memory state
    /// stays authoritative for the rest of the process lifetime.
    fn persist(&self) {
        let lines = self.lines.read();
        if let Err(e) = self.store.persist(CART_NAMESPACE, &*lines) {
            tracing::warn!(
                namespace = CART_NAMESPACE,
                error = %e,
                "cart snapshot write failed, in-memory state remains authoritative"
            );
        }
    }

    fn emit(&self, event: CartEvent) {
        // No subscribers is fine
        let _ = self.event_tx.send(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::dataset::demo_products;

    fn engine() -> CartEngine {
        CartEngine::restore(StateStore::open_in_memory().unwrap())
    }

    /// (product, variant) pair from the demo catalog
    fn fixture(product_idx: usize, variant_idx: usize) -> (Product, ProductVariant) {
        let product = demo_products().swap_remove(product_idx);
        let variant = product.variants[variant_idx].clone();
        (product, variant)
    }

    #[test]
    fn test_add_creates_selected_line() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);

        cart.add(&iphone, &black, 1);

        assert!(cart.contains(black.id));
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 1);
        assert!(lines[0].is_selected);
        assert_eq!(lines[0].product_id, iphone.id);
    }

    #[test]
    fn test_repeated_adds_merge_into_one_line() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);

        cart.add(&iphone, &black, 1);
        cart.add(&iphone, &black, 2);
        cart.add(&iphone, &black, 3);

        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 6);
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn test_distinct_variants_get_distinct_lines() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        let white = iphone.variants[1].clone();

        cart.add(&iphone, &black, 1);
        cart.add(&iphone, &white, 1);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_add_zero_is_a_noop() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        let mut events = cart.subscribe();

        cart.add(&iphone, &black, 0);

        assert!(cart.is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_remove_absent_is_a_noop() {
        let cart = engine();
        let mut events = cart.subscribe();

        cart.remove(12345);

        assert!(cart.is_empty());
        assert!(events.try_recv().is_err());
    }

    #[test]
    fn test_update_quantity_sets_absolute_value() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);

        cart.add(&iphone, &black, 5);
        cart.update_quantity(black.id, 2);

        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn test_update_quantity_to_zero_removes_line() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);

        cart.add(&iphone, &black, 3);
        cart.update_quantity(black.id, 0);

        assert!(!cart.contains(black.id));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_absent_is_a_noop() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        cart.add(&iphone, &black, 1);

        cart.update_quantity(9999, 7);

        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_toggle_selection() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        cart.add(&iphone, &black, 1);

        cart.toggle_selection(black.id);
        assert!(!cart.lines()[0].is_selected);

        cart.toggle_selection(black.id);
        assert!(cart.lines()[0].is_selected);
    }

    #[test]
    fn test_totals() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0); // 74999.0
        let (sony, sony_black) = fixture(3, 0); // 9499.0

        cart.add(&iphone, &black, 2);
        cart.add(&sony, &sony_black, 1);

        assert_eq!(cart.total_price(), 2.0 * 74999.0 + 9499.0);
        assert_eq!(cart.selected_total_price(), cart.total_price());

        cart.toggle_selection(black.id);
        assert_eq!(cart.selected_total_price(), 9499.0);
        assert_eq!(cart.selected_item_count(), 1);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_select_all_drives_checkout_total() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        let (sony, sony_black) = fixture(3, 0);
        cart.add(&iphone, &black, 1);
        cart.add(&sony, &sony_black, 1);

        cart.select_all(false);
        assert_eq!(cart.selected_total_price(), 0.0);
        assert_eq!(cart.selected_item_count(), 0);

        cart.select_all(true);
        assert_eq!(cart.selected_total_price(), cart.total_price());
    }

    #[test]
    fn test_clear() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        cart.add(&iphone, &black, 4);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price(), 0.0);
    }

    #[test]
    fn test_merge_saturates_instead_of_wrapping() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);

        cart.add(&iphone, &black, u32::MAX);
        cart.add(&iphone, &black, 1);

        // A wrapping sum would land on 0 here and leave a line that
        // violates quantity >= 1
        assert_eq!(cart.lines()[0].quantity, u32::MAX);
        assert_eq!(cart.item_count(), u32::MAX);
        assert_eq!(cart.selected_item_count(), u32::MAX);
        assert!(cart.contains(black.id));
    }

    #[test]
    fn test_item_count_saturates_across_lines() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        let white = iphone.variants[1].clone();

        cart.add(&iphone, &black, u32::MAX);
        cart.add(&iphone, &white, 2);

        assert_eq!(cart.item_count(), u32::MAX);
    }

    #[test]
    fn test_restore_prunes_invalid_snapshot_lines() {
        let store = StateStore::open_in_memory().unwrap();
        let (iphone, black) = fixture(0, 0);

        let first = CartLine::new(&iphone, &black, 2);
        let mut duplicate = CartLine::new(&iphone, &black, 9);
        duplicate.is_selected = false;
        let mut zeroed = CartLine::new(&iphone, &iphone.variants[1], 1);
        zeroed.quantity = 0;
        store
            .persist(CART_NAMESPACE, &vec![first, duplicate, zeroed])
            .unwrap();

        let cart = CartEngine::restore(store);
        let lines = cart.lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].variant_id, black.id);
        assert_eq!(lines[0].quantity, 2);
        assert!(lines[0].is_selected);
    }

    #[test]
    fn test_restore_reconstructs_lines() {
        let store = StateStore::open_in_memory().unwrap();
        let (iphone, black) = fixture(0, 0);
        let (sony, sony_black) = fixture(3, 0);

        {
            let cart = CartEngine::restore(store.clone());
            cart.add(&iphone, &black, 2);
            cart.add(&sony, &sony_black, 1);
            cart.toggle_selection(sony_black.id);
        }

        let restored = CartEngine::restore(store);
        let lines = restored.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].variant_id, black.id);
        assert_eq!(lines[0].quantity, 2);
        assert!(lines[0].is_selected);
        assert_eq!(lines[1].variant_id, sony_black.id);
        assert!(!lines[1].is_selected);
    }

    #[test]
    fn test_corrupt_snapshot_starts_empty() {
        let store = StateStore::open_in_memory().unwrap();
        store.persist(CART_NAMESPACE, &"definitely not cart lines").unwrap();

        let cart = CartEngine::restore(store);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_events_for_observable_changes_only() {
        let cart = engine();
        let (iphone, black) = fixture(0, 0);
        let mut events = cart.subscribe();

        cart.add(&iphone, &black, 2);
        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent::ItemAdded { variant_id: black.id, quantity: 2 }
        );

        cart.update_quantity(black.id, 5);
        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent::QuantityUpdated { variant_id: black.id, quantity: 5 }
        );

        // Already selected; select_all(true) changes nothing
        cart.select_all(true);
        assert!(events.try_recv().is_err());

        cart.update_quantity(black.id, 0);
        assert_eq!(
            events.try_recv().unwrap(),
            CartEvent::ItemRemoved { variant_id: black.id }
        );
    }
}
