//! Cart line item

use super::{Product, ProductVariant};
use serde::{Deserialize, Serialize};

/// One entry in the cart, uniquely keyed by `variant_id`
///
/// `product` and `variant` are denormalized snapshots taken at
/// add-time. The cart displays from these copies and never re-joins
/// against the live catalog, so a line keeps rendering correctly even
/// if the catalog conceptually changed after the add. Stale price or
/// stock in a long-lived cart is the intended behavior, not a bug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: i64,
    pub variant_id: i64,
    /// Always >= 1; an update that would drop below 1 removes the line
    pub quantity: u32,
    /// Marks the line for inclusion in the checkout total
    pub is_selected: bool,
    pub product: Product,
    pub variant: ProductVariant,
}

impl CartLine {
    /// Snapshot a product/variant pair into a new selected line
    pub fn new(product: &Product, variant: &ProductVariant, quantity: u32) -> Self {
        Self {
            product_id: product.id,
            variant_id: variant.id,
            quantity,
            is_selected: true,
            product: product.clone(),
            variant: variant.clone(),
        }
    }
}
