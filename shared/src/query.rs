//! Catalog query types: filters, sorting, pagination

use serde::{Deserialize, Serialize};

/// Sort order for product listings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortBy {
    #[default]
    Newest,
    Oldest,
    PriceLowToHigh,
    PriceHighToLow,
    MostPopular,
    BestRating,
    MostReviewed,
    Alphabetical,
}

/// Filter set for `CatalogStore::query`
///
/// All filters are conjunctive. `category_id` expands to the full
/// category subtree; `min_price`/`max_price` test the product's
/// lowest variant price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub brand_ids: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub sort_by: SortBy,
    /// 1-based page number; out-of-range pages are clamped
    pub page: usize,
    pub limit: usize,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            query: None,
            category_id: None,
            brand_ids: Vec::new(),
            min_price: None,
            max_price: None,
            sort_by: SortBy::default(),
            page: 1,
            limit: 24,
        }
    }
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total_items: usize,
    pub total_pages: usize,
    pub current_page: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl<T> Page<T> {
    /// Slice `items` into the requested page
    ///
    /// Pages are 1-based. A page past the end yields the last
    /// non-empty page (or page 1 when there are no items at all).
    pub fn paginate(items: Vec<T>, page: usize, limit: usize) -> Self {
        let limit = limit.max(1);
        let total_items = items.len();
        let total_pages = total_items.div_ceil(limit).max(1);
        let current_page = page.clamp(1, total_pages);
        let start = (current_page - 1) * limit;

        let items: Vec<T> = items
            .into_iter()
            .skip(start)
            .take(limit)
            .collect();

        Self {
            items,
            total_items,
            total_pages,
            current_page,
            has_next_page: current_page < total_pages,
            has_previous_page: current_page > 1,
        }
    }
}
