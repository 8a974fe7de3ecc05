//! Data models
//!
//! Shared between the engine crate and presentation collaborators.
//! All IDs are `i64`, assigned by the catalog source.

pub mod brand;
pub mod cart;
pub mod category;
pub mod product;

// Re-exports
pub use brand::*;
pub use cart::*;
pub use category::*;
pub use product::*;
