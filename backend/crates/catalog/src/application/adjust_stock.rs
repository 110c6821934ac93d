//! Adjust Stock Use Case
//!
//! Relative stock change (receive or pick), applied atomically by the store.

use std::sync::Arc;

use kernel::id::ProductId;

use crate::domain::entity::product::{Product, current_timestamp};
use crate::domain::repository::ProductRepository;
use crate::error::{CatalogError, CatalogResult};

/// Adjust stock use case
pub struct AdjustStockUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> AdjustStockUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: ProductId, delta: i64) -> CatalogResult<Product> {
        // Anything wider could never produce a storable quantity
        if delta.unsigned_abs() > i32::MAX as u64 {
            return Err(CatalogError::Validation(format!(
                "Stock delta must be between -{max} and {max}",
                max = i32::MAX
            )));
        }

        let product = self.repo.adjust_quantity(&id, delta, current_timestamp()).await?;

        tracing::info!(
            product_id = %product.id,
            delta,
            quantity = product.quantity.value(),
            "Stock adjusted"
        );

        Ok(product)
    }
}
