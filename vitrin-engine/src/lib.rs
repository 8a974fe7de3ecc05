//! Vitrin Engine - storefront state and catalog queries
//!
//! The client-side engine behind the Vitrin storefront: an immutable
//! catalog with query/search/pagination on top, and two persistent
//! state engines (cart and favorites) that survive restarts through
//! an embedded redb store.
//!
//! # Module Structure
//!
//! ```text
//! vitrin-engine/src/
//! ├── catalog/       # CatalogStore queries + demo dataset
//! ├── cart.rs        # CartEngine, line items and totals
//! ├── favorites.rs   # FavoritesEngine, the wishlist
//! ├── storage.rs     # StateStore, namespaced redb snapshots
//! └── config.rs      # StoreConfig from environment
//! ```
//!
//! # Lifecycle
//!
//! Engines are constructed through `restore(store)`: the persisted
//! snapshot is loaded before the handle is handed out, so a reader
//! never observes a pre-restore empty state. After that, every
//! mutation persists a fresh snapshot and broadcasts an event.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod favorites;
pub mod storage;

pub use cart::{CartEngine, CartEvent};
pub use catalog::{CatalogData, CatalogError, CatalogStore};
pub use config::StoreConfig;
pub use favorites::{FavoritesEngine, FavoritesEvent};
pub use storage::{StateStore, StorageError};
