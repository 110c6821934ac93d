//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! SKU uniqueness and non-negative stock are enforced here, inside each
//! write, never by a separate read beforehand.

use chrono::{DateTime, Utc};
use kernel::id::ProductId;
use kernel::pagination::PageRequest;

use crate::domain::entity::product::{Product, ProductPatch};
use crate::domain::entity::summary::InventorySummary;
use crate::domain::value_object::SearchQuery;
use crate::error::CatalogResult;

/// Product repository trait
#[trait_variant::make(ProductRepository: Send)]
pub trait LocalProductRepository {
    /// Insert a new product; `CatalogError::DuplicateSku` on SKU collision
    async fn insert(&self, product: &Product) -> CatalogResult<()>;

    /// Find product by ID
    async fn find_by_id(&self, id: &ProductId) -> CatalogResult<Option<Product>>;

    /// Apply a patch; `Ok(None)` when the product does not exist
    async fn update(
        &self,
        id: &ProductId,
        patch: &ProductPatch,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Option<Product>>;

    /// Add `delta` to the stock in one atomic step
    ///
    /// `CatalogError::NotFound` for an unknown id and
    /// `CatalogError::InsufficientStock` when the result would be negative.
    async fn adjust_quantity(
        &self,
        id: &ProductId,
        delta: i64,
        updated_at: DateTime<Utc>,
    ) -> CatalogResult<Product>;

    /// Hard delete; `false` when nothing was deleted
    async fn delete(&self, id: &ProductId) -> CatalogResult<bool>;

    /// One page of products plus the total number of matches
    ///
    /// Without a query: newest first. With a query: by relevance, then
    /// newest first. Ties always break on id, descending.
    async fn list(
        &self,
        request: PageRequest,
        search: Option<&SearchQuery>,
    ) -> CatalogResult<(Vec<Product>, u64)>;

    /// Totals over the whole catalog, computed from one consistent read
    async fn summary(&self, low_stock_threshold: i32) -> CatalogResult<InventorySummary>;
}
