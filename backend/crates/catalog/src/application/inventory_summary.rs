//! Inventory Summary Use Case

use std::sync::Arc;

use crate::application::config::CatalogConfig;
use crate::domain::entity::summary::InventorySummary;
use crate::domain::repository::ProductRepository;
use crate::error::CatalogResult;

/// Dashboard totals use case
pub struct InventorySummaryUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
    config: Arc<CatalogConfig>,
}

impl<R> InventorySummaryUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<CatalogConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self) -> CatalogResult<InventorySummary> {
        self.repo.summary(self.config.low_stock_threshold).await
    }
}
