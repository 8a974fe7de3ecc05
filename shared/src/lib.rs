//! Shared types for the Vitrin storefront engine
//!
//! Domain models (products, categories, brands, cart lines), query
//! types, and display utilities used by the engine crate and by
//! presentation-layer collaborators.

pub mod models;
pub mod query;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use models::{
    Brand, CartLine, Category, Product, ProductImage, ProductStatus, ProductVariant, VariantOption,
};
pub use query::{Page, ProductQuery, SortBy};
pub use types::Locale;
