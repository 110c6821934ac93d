//! Application Configuration
//!
//! Configuration for the Catalog application layer.

/// Catalog application configuration
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Page size when `limit` is absent
    pub default_page_size: u64,
    /// Upper clamp for `limit`
    pub max_page_size: u64,
    /// Products at or below this quantity count as low stock
    pub low_stock_threshold: i32,
}

/// Low-stock line used by the dashboard summary
pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 10;

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_page_size: 10,
            max_page_size: 100,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }
}

impl CatalogConfig {
    /// Build with explicit sizes; the default is clamped into `1..=max`
    pub fn new(default_page_size: u64, max_page_size: u64) -> Self {
        let max_page_size = max_page_size.max(1);
        Self {
            default_page_size: default_page_size.clamp(1, max_page_size),
            max_page_size,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
        }
    }

    /// Override the low-stock line; negative values become 0
    pub fn with_low_stock_threshold(mut self, threshold: i32) -> Self {
        self.low_stock_threshold = threshold.max(0);
        self
    }
}
