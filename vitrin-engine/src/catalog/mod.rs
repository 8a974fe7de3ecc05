//! Catalog Store - read-only product, category and brand queries
//!
//! Holds an immutable dataset injected at startup and answers the
//! lookup, search, filter and tree-traversal queries the storefront
//! needs. Construction validates the catalog invariants (unique
//! product slugs, globally unique variant ids, unique category slugs,
//! variants present on sellable products) and builds id/slug indexes;
//! after that every operation is a pure read.

pub mod dataset;

use crate::config::StoreConfig;
use shared::models::{Brand, Category, Product, ProductStatus};
use shared::query::{Page, ProductQuery, SortBy};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Catalog construction errors
///
/// Any dataset that would violate a catalog invariant is rejected
/// here, at the boundary, rather than allowed to corrupt queries
/// (cart keys rely on variant id uniqueness in particular).
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate product slug: {0}")]
    DuplicateProductSlug(String),

    #[error("duplicate variant id: {0}")]
    DuplicateVariantId(i64),

    #[error("duplicate category slug: {0}")]
    DuplicateCategorySlug(String),

    #[error("product {0} is sellable but has no variants")]
    NoVariants(i64),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

/// The immutable dataset a [`CatalogStore`] is built from
///
/// Loading is the collaborator's concern (an API or database in a
/// production deployment); [`dataset::demo_catalog`] provides the
/// built-in fixture.
#[derive(Debug, Clone, Default)]
pub struct CatalogData {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Read-only catalog query service
pub struct CatalogStore {
    data: CatalogData,
    /// slug -> index into `data.products`
    slug_index: HashMap<String, usize>,
    /// id -> index into `data.products`
    id_index: HashMap<i64, usize>,
    featured_limit: usize,
    best_sellers_limit: usize,
}

impl std::fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogStore")
            .field("products", &self.data.products.len())
            .field("categories", &self.data.categories.len())
            .field("brands", &self.data.brands.len())
            .finish()
    }
}

impl CatalogStore {
    /// Build a store with default listing limits
    pub fn new(data: CatalogData) -> CatalogResult<Self> {
        Self::with_limits(data, StoreConfig::default())
    }

    /// Build a store with limits taken from the engine config
    pub fn with_config(data: CatalogData, config: &StoreConfig) -> CatalogResult<Self> {
        Self::with_limits(data, config.clone())
    }

    fn with_limits(data: CatalogData, config: StoreConfig) -> CatalogResult<Self> {
        Self::validate(&data)?;

        let mut slug_index = HashMap::with_capacity(data.products.len());
        let mut id_index = HashMap::with_capacity(data.products.len());
        for (idx, product) in data.products.iter().enumerate() {
            slug_index.insert(product.slug.clone(), idx);
            id_index.insert(product.id, idx);
        }

        tracing::info!(
            products = data.products.len(),
            categories = data.categories.len(),
            brands = data.brands.len(),
            "catalog store ready"
        );

        Ok(Self {
            data,
            slug_index,
            id_index,
            featured_limit: config.featured_limit,
            best_sellers_limit: config.best_sellers_limit,
        })
    }

    fn validate(data: &CatalogData) -> CatalogResult<()> {
        let mut product_slugs = HashSet::new();
        let mut variant_ids = HashSet::new();
        for product in &data.products {
            if !product_slugs.insert(product.slug.as_str()) {
                return Err(CatalogError::DuplicateProductSlug(product.slug.clone()));
            }
            if product.status == ProductStatus::Active && product.variants.is_empty() {
                return Err(CatalogError::NoVariants(product.id));
            }
            for variant in &product.variants {
                if !variant_ids.insert(variant.id) {
                    return Err(CatalogError::DuplicateVariantId(variant.id));
                }
            }
        }

        // Category slugs must be unique across the whole tree
        let mut category_slugs = HashSet::new();
        let mut stack: Vec<&Category> = data.categories.iter().collect();
        while let Some(category) = stack.pop() {
            if !category_slugs.insert(category.slug.as_str()) {
                return Err(CatalogError::DuplicateCategorySlug(category.slug.clone()));
            }
            stack.extend(category.children.iter());
        }

        Ok(())
    }

    // ========== Accessors ==========

    pub fn products(&self) -> &[Product] {
        &self.data.products
    }

    /// Root categories in declaration order
    pub fn categories(&self) -> &[Category] {
        &self.data.categories
    }

    pub fn brands(&self) -> &[Brand] {
        &self.data.brands
    }

    // ========== Identity lookups ==========

    pub fn product_by_slug(&self, slug: &str) -> Option<&Product> {
        self.slug_index.get(slug).map(|&idx| &self.data.products[idx])
    }

    pub fn product_by_id(&self, id: i64) -> Option<&Product> {
        self.id_index.get(&id).map(|&idx| &self.data.products[idx])
    }

    /// Products assigned to exactly this category id
    ///
    /// No subtree expansion; callers wanting a whole branch combine
    /// this with [`subtree_category_ids`](Self::subtree_category_ids).
    pub fn products_by_category(&self, category_id: i64) -> Vec<&Product> {
        self.data
            .products
            .iter()
            .filter(|p| p.category_id == category_id)
            .collect()
    }

    /// First category (at any depth, pre-order) whose slug matches
    pub fn category_by_slug(&self, slug: &str) -> Option<&Category> {
        // Explicit stack, seeded in reverse so pop order is pre-order
        let mut stack: Vec<&Category> = self.data.categories.iter().rev().collect();
        while let Some(category) = stack.pop() {
            if category.slug == slug {
                return Some(category);
            }
            stack.extend(category.children.iter().rev());
        }
        None
    }

    /// Ids of the category with this slug plus all its descendants
    pub fn subtree_category_ids(&self, slug: &str) -> Vec<i64> {
        let Some(root) = self.category_by_slug(slug) else {
            return Vec::new();
        };
        self.collect_subtree_ids(root)
    }

    fn collect_subtree_ids(&self, root: &Category) -> Vec<i64> {
        let mut ids = Vec::new();
        let mut stack = vec![root];
        while let Some(category) = stack.pop() {
            ids.push(category.id);
            stack.extend(category.children.iter());
        }
        ids
    }

    // ========== Search and listings ==========

    /// Case-insensitive substring search over name, description,
    /// brand name and category name; a product matches if any field
    /// contains the query. An empty query matches everything.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        let needle = query.to_lowercase();
        self.data
            .products
            .iter()
            .filter(|p| Self::matches(p, &needle))
            .collect()
    }

    fn matches(product: &Product, needle: &str) -> bool {
        product.name.to_lowercase().contains(needle)
            || product
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(needle))
            || product
                .brand_name
                .as_deref()
                .is_some_and(|b| b.to_lowercase().contains(needle))
            || product.category_name.to_lowercase().contains(needle)
    }

    /// Default featured selection: the first `featured_limit`
    /// products in catalog declaration order. A placeholder for a
    /// real curation flag; collaborators with an actual policy use
    /// [`featured_with`](Self::featured_with).
    pub fn featured(&self) -> Vec<&Product> {
        self.data.products.iter().take(self.featured_limit).collect()
    }

    /// Featured selection with a caller-supplied predicate, applied
    /// in declaration order up to `featured_limit`
    pub fn featured_with<F>(&self, predicate: F) -> Vec<&Product>
    where
        F: Fn(&Product) -> bool,
    {
        self.data
            .products
            .iter()
            .filter(|p| predicate(p))
            .take(self.featured_limit)
            .collect()
    }

    /// Top products by review count, descending; ties keep catalog
    /// declaration order (stable sort)
    pub fn best_sellers(&self) -> Vec<&Product> {
        let mut ranked: Vec<&Product> = self.data.products.iter().collect();
        ranked.sort_by(|a, b| b.review_count.cmp(&a.review_count));
        ranked.truncate(self.best_sellers_limit);
        ranked
    }

    // ========== Filtered queries ==========

    /// Combined filter/sort/paginate query over the catalog
    ///
    /// `category_id` selects the whole subtree rooted at that
    /// category. Price bounds test the product's lowest variant
    /// price. Every sort is stable, so equal keys keep declaration
    /// order.
    pub fn query(&self, query: &ProductQuery) -> Page<Product> {
        let needle = query
            .query
            .as_deref()
            .map(str::to_lowercase)
            .filter(|q| !q.is_empty());
        let category_ids: Option<HashSet<i64>> = query.category_id.map(|id| {
            self.category_by_id(id)
                .map(|c| self.collect_subtree_ids(c).into_iter().collect())
                .unwrap_or_else(|| HashSet::from([id]))
        });
        let brand_ids: Option<HashSet<i64>> = if query.brand_ids.is_empty() {
            None
        } else {
            Some(query.brand_ids.iter().copied().collect())
        };

        let mut results: Vec<&Product> = self
            .data
            .products
            .iter()
            .filter(|p| needle.as_deref().is_none_or(|n| Self::matches(p, n)))
            .filter(|p| {
                category_ids
                    .as_ref()
                    .is_none_or(|ids| ids.contains(&p.category_id))
            })
            .filter(|p| {
                brand_ids
                    .as_ref()
                    .is_none_or(|ids| p.brand_id.is_some_and(|b| ids.contains(&b)))
            })
            .filter(|p| {
                let price = p.min_price();
                query
                    .min_price
                    .is_none_or(|min| price.is_some_and(|pr| pr >= min))
                    && query
                        .max_price
                        .is_none_or(|max| price.is_some_and(|pr| pr <= max))
            })
            .collect();

        Self::sort(&mut results, query.sort_by);

        let items: Vec<Product> = results.into_iter().cloned().collect();
        Page::paginate(items, query.page, query.limit)
    }

    fn sort(products: &mut [&Product], sort_by: SortBy) {
        match sort_by {
            SortBy::Newest => products.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            SortBy::Oldest => products.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            SortBy::PriceLowToHigh => products.sort_by(|a, b| {
                let (pa, pb) = (a.min_price(), b.min_price());
                // unpriced products sink to the end
                match (pa, pb) {
                    (Some(pa), Some(pb)) => pa.total_cmp(&pb),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            }),
            SortBy::PriceHighToLow => products.sort_by(|a, b| {
                let (pa, pb) = (a.min_price(), b.min_price());
                match (pa, pb) {
                    (Some(pa), Some(pb)) => pb.total_cmp(&pa),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                }
            }),
            SortBy::MostPopular => products.sort_by(|a, b| {
                b.review_count
                    .cmp(&a.review_count)
                    .then(b.rating.total_cmp(&a.rating))
            }),
            SortBy::BestRating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
            SortBy::MostReviewed => products.sort_by(|a, b| b.review_count.cmp(&a.review_count)),
            SortBy::Alphabetical => {
                products.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
            }
        }
    }

    fn category_by_id(&self, id: i64) -> Option<&Category> {
        let mut stack: Vec<&Category> = self.data.categories.iter().rev().collect();
        while let Some(category) = stack.pop() {
            if category.id == id {
                return Some(category);
            }
            stack.extend(category.children.iter().rev());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::dataset::demo_catalog;
    use super::*;

    fn store() -> CatalogStore {
        CatalogStore::new(demo_catalog()).unwrap()
    }

    #[test]
    fn test_slugs_unique_and_self_lookup() {
        let store = store();
        for product in store.products() {
            let found = store.product_by_slug(&product.slug).unwrap();
            assert_eq!(found.id, product.id);
        }
    }

    #[test]
    fn test_product_by_slug() {
        let store = store();
        let product = store.product_by_slug("iphone-15-pro-max-256gb").unwrap();
        assert_eq!(product.name, "iPhone 15 Pro Max 256GB");
        assert!(store.product_by_slug("yok-boyle-bir-urun").is_none());
    }

    #[test]
    fn test_product_by_id() {
        let store = store();
        assert_eq!(store.product_by_id(3).unwrap().name, "Nike Air Max 270");
        assert!(store.product_by_id(999).is_none());
    }

    #[test]
    fn test_products_by_category_is_exact_match() {
        let store = store();
        // Category 52 (Spor Ayakkabı) holds Nike and Adidas
        let shoes = store.products_by_category(52);
        assert_eq!(shoes.len(), 2);
        // Parent category 5 (Spor) holds nothing directly
        assert!(store.products_by_category(5).is_empty());
    }

    #[test]
    fn test_category_by_slug_finds_nested_nodes() {
        let store = store();
        assert_eq!(store.category_by_slug("elektronik").unwrap().id, 1);
        let telefon = store.category_by_slug("telefon").unwrap();
        assert_eq!(telefon.id, 11);
        assert_eq!(telefon.parent_id, Some(1));
        assert!(store.category_by_slug("bilinmeyen").is_none());
    }

    #[test]
    fn test_subtree_category_ids() {
        let store = store();
        let mut ids = store.subtree_category_ids("elektronik");
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 11, 12, 13, 14]);
        assert_eq!(store.subtree_category_ids("telefon"), vec![11]);
        assert!(store.subtree_category_ids("bilinmeyen").is_empty());
    }

    #[test]
    fn test_search_by_name_case_insensitive() {
        let store = store();
        let results = store.search("iphone");
        assert!(results.iter().any(|p| p.name == "iPhone 15 Pro Max 256GB"));
        let results = store.search("IPHONE");
        assert!(results.iter().any(|p| p.name == "iPhone 15 Pro Max 256GB"));
    }

    #[test]
    fn test_search_by_brand_name() {
        let store = store();
        let results = store.search("Apple");
        let apple_count = store
            .products()
            .iter()
            .filter(|p| p.brand_name.as_deref() == Some("Apple"))
            .count();
        assert_eq!(apple_count, 2); // iPhone and MacBook fixtures
        assert_eq!(results.len(), apple_count);
    }

    #[test]
    fn test_search_by_category_name() {
        let store = store();
        let results = store.search("kulaklık");
        assert!(results.iter().any(|p| p.name.starts_with("Sony WH-1000XM5")));
    }

    #[test]
    fn test_search_empty_query_returns_all() {
        let store = store();
        assert_eq!(store.search("").len(), store.products().len());
    }

    #[test]
    fn test_featured_is_catalog_prefix() {
        let store = store();
        let featured = store.featured();
        assert_eq!(featured.len(), 8);
        let ids: Vec<i64> = featured.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_featured_with_predicate() {
        let store = store();
        let discounted = store.featured_with(|p| {
            p.variants.iter().any(|v| v.has_discount())
        });
        assert!(!discounted.is_empty());
        assert!(discounted.len() <= 8);
    }

    #[test]
    fn test_best_sellers_ordering() {
        let store = store();
        let counts: Vec<u32> = store.best_sellers().iter().map(|p| p.review_count).collect();
        assert_eq!(counts, vec![2340, 1890, 1250, 890]);
    }

    #[test]
    fn test_query_category_subtree() {
        let store = store();
        // Root "Spor" (id 5) expands to its children; shoes live in 52
        let page = store.query(&ProductQuery {
            category_id: Some(5),
            ..ProductQuery::default()
        });
        assert_eq!(page.total_items, 2);
        assert!(page.items.iter().all(|p| p.category_id == 52));
    }

    #[test]
    fn test_query_brand_and_price_band() {
        let store = store();
        let page = store.query(&ProductQuery {
            brand_ids: vec![1, 5], // Apple, Sony
            max_price: Some(10_000.0),
            ..ProductQuery::default()
        });
        // Only the Sony headphones fit under 10k
        assert_eq!(page.total_items, 1);
        assert!(page.items[0].name.starts_with("Sony"));
    }

    #[test]
    fn test_query_sort_price_low_to_high() {
        let store = store();
        let page = store.query(&ProductQuery {
            sort_by: SortBy::PriceLowToHigh,
            ..ProductQuery::default()
        });
        let prices: Vec<f64> = page.items.iter().filter_map(|p| p.min_price()).collect();
        let mut sorted = prices.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(prices, sorted);
    }

    #[test]
    fn test_query_sort_newest_first() {
        let store = store();
        let page = store.query(&ProductQuery {
            sort_by: SortBy::Newest,
            ..ProductQuery::default()
        });
        let stamps: Vec<i64> = page.items.iter().map(|p| p.created_at).collect();
        assert!(stamps.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_query_pagination() {
        let store = store();
        let page = store.query(&ProductQuery {
            limit: 3,
            page: 2,
            ..ProductQuery::default()
        });
        assert_eq!(page.total_items, 8);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.items.len(), 3);
        assert!(page.has_next_page);
        assert!(page.has_previous_page);
    }

    #[test]
    fn test_duplicate_product_slug_rejected() {
        let mut data = demo_catalog();
        let mut dup = data.products[0].clone();
        dup.id = 999;
        // keep the slug, change variant ids so only the slug collides
        for (i, v) in dup.variants.iter_mut().enumerate() {
            v.id = 9_000 + i as i64;
        }
        data.products.push(dup);
        assert!(matches!(
            CatalogStore::new(data),
            Err(CatalogError::DuplicateProductSlug(_))
        ));
    }

    #[test]
    fn test_duplicate_variant_id_rejected() {
        let mut data = demo_catalog();
        let mut dup = data.products[0].clone();
        dup.id = 999;
        dup.slug = "baska-slug".into();
        data.products.push(dup); // variant ids collide with product 1
        assert!(matches!(
            CatalogStore::new(data),
            Err(CatalogError::DuplicateVariantId(_))
        ));
    }

    #[test]
    fn test_active_product_without_variants_rejected() {
        let mut data = demo_catalog();
        data.products[0].variants.clear();
        assert!(matches!(
            CatalogStore::new(data),
            Err(CatalogError::NoVariants(1))
        ));
    }

    #[test]
    fn test_duplicate_category_slug_rejected() {
        let mut data = demo_catalog();
        let mut dup = data.categories[0].clone();
        dup.id = 999;
        dup.children.clear();
        data.categories.push(dup);
        assert!(matches!(
            CatalogStore::new(data),
            Err(CatalogError::DuplicateCategorySlug(_))
        ));
    }
}
