//! Product Model

use serde::{Deserialize, Serialize};

/// Product lifecycle status
///
/// Serialized as the integer the catalog source uses on the wire
/// (0 = Draft .. 3 = Deleted).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub enum ProductStatus {
    Draft,
    Active,
    Archived,
    Deleted,
}

impl TryFrom<i32> for ProductStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Active),
            2 => Ok(Self::Archived),
            3 => Ok(Self::Deleted),
            other => Err(format!("invalid product status: {other}")),
        }
    }
}

impl From<ProductStatus> for i32 {
    fn from(status: ProductStatus) -> i32 {
        match status {
            ProductStatus::Draft => 0,
            ProductStatus::Active => 1,
            ProductStatus::Archived => 2,
            ProductStatus::Deleted => 3,
        }
    }
}

/// Product entity
///
/// Immutable for the lifetime of the catalog that owns it. Display
/// denormalizations (`brand_name`, `category_name`) are snapshots
/// taken when the catalog was assembled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unique across the whole catalog
    pub slug: String,
    pub description: Option<String>,
    pub brand_id: Option<i64>,
    pub brand_name: Option<String>,
    pub category_id: i64,
    pub category_name: String,
    /// Aggregate review rating in [0, 5]
    pub rating: f64,
    pub review_count: u32,
    /// Epoch millis
    pub created_at: i64,
    pub status: ProductStatus,
    /// Non-empty for any sellable (Active) product
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// First variant in declaration order, the default purchase choice
    pub fn primary_variant(&self) -> Option<&ProductVariant> {
        self.variants.first()
    }

    /// Lowest variant price, used for price-band filtering and sorting
    pub fn min_price(&self) -> Option<f64> {
        self.variants
            .iter()
            .map(|v| v.price)
            .min_by(|a, b| a.total_cmp(b))
    }
}

/// Product variant entity
///
/// A specific purchasable configuration (e.g. a color/size combo)
/// with its own price and stock. Variant IDs are unique across the
/// whole catalog; cart line keys rely on this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: i64,
    pub price: f64,
    /// Pre-discount price; when present, `original_price >= price`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub stock: u32,
    pub barcode: String,
    pub sku: String,
    /// Possibly empty; display falls back to a placeholder image
    #[serde(default)]
    pub thumbnails: Vec<ProductImage>,
    #[serde(default)]
    pub options: Vec<VariantOption>,
}

impl ProductVariant {
    pub fn has_discount(&self) -> bool {
        self.original_price.is_some_and(|op| op > self.price)
    }

    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Variant image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i64,
    pub url: String,
    pub alt_text: Option<String>,
}

/// Distinguishing attribute of a variant (title/value pair, e.g. Renk/Siyah)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantOption {
    pub id: i64,
    pub title: String,
    pub value: String,
}
