//! Engine configuration

use shared::query::ProductQuery;
use std::path::{Path, PathBuf};

/// Database file name inside the data directory
const DB_FILE_NAME: &str = "vitrin.redb";

/// Storefront engine configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding the persistence database
    pub data_dir: PathBuf,
    /// Number of products the default featured selector returns
    pub featured_limit: usize,
    /// Number of products `best_sellers` returns
    pub best_sellers_limit: usize,
    /// Page size used when a query does not specify one
    pub default_page_size: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            featured_limit: 8,
            best_sellers_limit: 4,
            default_page_size: 24,
        }
    }
}

impl StoreConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            data_dir: std::env::var("VITRIN_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
            featured_limit: std::env::var("VITRIN_FEATURED_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.featured_limit),
            best_sellers_limit: std::env::var("VITRIN_BEST_SELLERS_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.best_sellers_limit),
            default_page_size: std::env::var("VITRIN_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_page_size),
        }
    }

    /// Config rooted at a specific data directory (tests, examples)
    pub fn with_data_dir(data_dir: impl AsRef<Path>) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Path of the redb database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(DB_FILE_NAME)
    }

    /// Empty query carrying the configured page size
    ///
    /// Callers seed their listing queries from this so `VITRIN_PAGE_SIZE`
    /// actually drives pagination.
    pub fn product_query(&self) -> ProductQuery {
        ProductQuery {
            limit: self.default_page_size,
            ..ProductQuery::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.featured_limit, 8);
        assert_eq!(config.best_sellers_limit, 4);
        assert_eq!(config.default_page_size, 24);
        assert!(config.db_path().ends_with("vitrin.redb"));
    }

    #[test]
    fn test_product_query_uses_configured_page_size() {
        let config = StoreConfig {
            default_page_size: 6,
            ..StoreConfig::default()
        };
        let query = config.product_query();
        assert_eq!(query.limit, 6);
        assert_eq!(query.page, 1);
        assert!(query.query.is_none());
    }

    #[test]
    fn test_with_data_dir() {
        let config = StoreConfig::with_data_dir("/tmp/vitrin-test");
        assert_eq!(config.db_path(), PathBuf::from("/tmp/vitrin-test/vitrin.redb"));
        assert_eq!(config.featured_limit, 8);
    }
}
