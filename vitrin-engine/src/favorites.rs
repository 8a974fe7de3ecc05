//! Favorites Engine - the product wishlist
//!
//! A deduplicated, insertion-ordered set of product ids. Same
//! lifecycle as the cart engine: restore on construction, persist
//! after every committed mutation, broadcast to subscribers.

use crate::storage::{FAVORITES_NAMESPACE, StateStore};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Committed favorites mutations, broadcast to subscribers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FavoritesEvent {
    Added { product_id: i64 },
    Removed { product_id: i64 },
    Cleared,
}

/// Favorites engine handle
///
/// Cheap to clone; all clones share the same list. Membership is a
/// linear scan - the list is user-curated and stays small.
#[derive(Clone)]
pub struct FavoritesEngine {
    ids: Arc<RwLock<Vec<i64>>>,
    store: StateStore,
    event_tx: broadcast::Sender<FavoritesEvent>,
}

impl std::fmt::Debug for FavoritesEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FavoritesEngine")
            .field("ids", &self.ids.read().len())
            .finish()
    }
}

impl FavoritesEngine {
    /// Create the engine, restoring the persisted favorites snapshot
    ///
    /// Missing or corrupt snapshots start the list empty, the latter
    /// with a warning.
    pub fn restore(store: StateStore) -> Self {
        let ids = match store.restore::<Vec<i64>>(FAVORITES_NAMESPACE) {
            Ok(Some(ids)) => {
                tracing::debug!(ids = ids.len(), "favorites restored from snapshot");
                ids
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(
                    namespace = FAVORITES_NAMESPACE,
                    error = %e,
                    "favorites snapshot unreadable, starting empty"
                );
                Vec::new()
            }
        };

        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            ids: Arc::new(RwLock::new(ids)),
            store,
            event_tx,
        }
    }

    /// Subscribe to committed mutations
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesEvent> {
        self.event_tx.subscribe()
    }

    // ========== Mutations ==========

    /// Add a product id; idempotent
    pub fn add(&self, product_id: i64) {
        let added = {
            let mut ids = self.ids.write();
            if ids.contains(&product_id) {
                false
            } else {
                ids.push(product_id);
                true
            }
        };

        if added {
            self.persist();
            self.emit(FavoritesEvent::Added { product_id });
        }
    }

    /// Remove a product id; no-op when absent
    pub fn remove(&self, product_id: i64) {
        let removed = {
            let mut ids = self.ids.write();
            let before = ids.len();
            ids.retain(|id| *id != product_id);
            ids.len() != before
        };

        if removed {
            self.persist();
            self.emit(FavoritesEvent::Removed { product_id });
        }
    }

    /// Flip membership in one pass, returning the new state
    /// (`true` = now a favorite)
    pub fn toggle(&self, product_id: i64) -> bool {
        let now_favorite = {
            let mut ids = self.ids.write();
            if let Some(pos) = ids.iter().position(|id| *id == product_id) {
                ids.remove(pos);
                false
            } else {
                ids.push(product_id);
                true
            }
        };

        self.persist();
        if now_favorite {
            self.emit(FavoritesEvent::Added { product_id });
        } else {
            self.emit(FavoritesEvent::Removed { product_id });
        }
        now_favorite
    }

    /// Remove every favorite
    pub fn clear(&self) {
        let cleared = {
            let mut ids = self.ids.write();
            let was_empty = ids.is_empty();
            ids.clear();
            !was_empty
        };

        if cleared {
            self.persist();
            self.emit(FavoritesEvent::Cleared);
        }
    }

    // ========== Queries ==========

    pub fn contains(&self, product_id: i64) -> bool {
        self.ids.read().contains(&product_id)
    }

    pub fn count(&self) -> usize {
        self.ids.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.read().is_empty()
    }

    /// Snapshot of the favorite ids, in insertion order
    pub fn ids(&self) -> Vec<i64> {
        self.ids.read().clone()
    }

    // ========== Internals ==========

    fn persist(&self) {
        let ids = self.ids.read();
        if let Err(e) = self.store.persist(FAVORITES_NAMESPACE, &*ids) {
            tracing::warn!(
                namespace = FAVORITES_NAMESPACE,
                error = %e,
                "favorites snapshot write failed, in-memory state remains authoritative"
            );
        }
    }

    fn emit(&self, event: FavoritesEvent) {
        let _ = self.event_tx.send(event);
    }
}
