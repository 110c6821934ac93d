//! Update Product Use Case
//!
//! Partial update: any non-empty subset of the product's fields.

use std::sync::Arc;

use kernel::id::ProductId;
use rust_decimal::Decimal;

use crate::domain::entity::product::{Product, ProductPatch, current_timestamp};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::text::{
    DESCRIPTION_MAX_LENGTH, IMAGE_URL_MAX_LENGTH, PRODUCT_TYPE_MAX_LENGTH, optional_text,
};
use crate::domain::value_object::{Price, ProductName, Quantity, Sku};
use crate::error::{CatalogError, CatalogResult};

/// Update product input (unvalidated)
///
/// `None` leaves a field unchanged. A blank string clears an optional field.
#[derive(Debug, Clone, Default)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i64>,
    pub image_url: Option<String>,
    pub product_type: Option<String>,
}

impl UpdateProductInput {
    /// Validate present fields; an empty patch is rejected
    pub fn validate(self) -> CatalogResult<ProductPatch> {
        let text = |field, value: Option<String>, max| {
            value
                .map(|value| optional_text(field, &value, max))
                .transpose()
        };

        let patch = ProductPatch {
            name: self.name.map(ProductName::new).transpose()?,
            sku: self.sku.map(|sku| Sku::parse(&sku)).transpose()?,
            description: text("description", self.description, DESCRIPTION_MAX_LENGTH)?,
            price: self.price.map(Price::new).transpose()?,
            quantity: self.quantity.map(Quantity::new).transpose()?,
            image_url: text("imageUrl", self.image_url, IMAGE_URL_MAX_LENGTH)?,
            product_type: text("type", self.product_type, PRODUCT_TYPE_MAX_LENGTH)?,
        };

        Ok(patch.ensure_not_empty()?)
    }
}

/// Update product use case
pub struct UpdateProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, id: ProductId, input: UpdateProductInput) -> CatalogResult<Product> {
        let patch = input.validate()?;

        let product = self
            .repo
            .update(&id, &patch, current_timestamp())
            .await?
            .ok_or(CatalogError::NotFound)?;

        tracing::info!(product_id = %product.id, "Product updated");

        Ok(product)
    }
}
