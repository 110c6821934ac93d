//! Create Product Use Case

use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::entity::product::{NewProduct, Product, current_timestamp};
use crate::domain::repository::ProductRepository;
use crate::domain::value_object::text::{
    DESCRIPTION_MAX_LENGTH, IMAGE_URL_MAX_LENGTH, PRODUCT_TYPE_MAX_LENGTH, optional_text,
};
use crate::domain::value_object::{Price, ProductName, Quantity, Sku};
use crate::error::CatalogResult;

/// Create product input (unvalidated)
#[derive(Debug, Clone)]
pub struct CreateProductInput {
    pub name: String,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Decimal,
    /// Defaults to 0
    pub quantity: Option<i64>,
    pub image_url: Option<String>,
    pub product_type: Option<String>,
}

impl CreateProductInput {
    /// Validate every field
    pub fn validate(self) -> CatalogResult<NewProduct> {
        let text = |field, value: Option<String>, max| match value {
            Some(value) => optional_text(field, &value, max),
            None => Ok(None),
        };

        Ok(NewProduct {
            name: ProductName::new(&self.name)?,
            sku: match self.sku {
                Some(sku) => Sku::parse(&sku)?,
                None => None,
            },
            description: text("description", self.description, DESCRIPTION_MAX_LENGTH)?,
            price: Price::new(self.price)?,
            quantity: Quantity::new(self.quantity.unwrap_or(0))?,
            image_url: text("imageUrl", self.image_url, IMAGE_URL_MAX_LENGTH)?,
            product_type: text("type", self.product_type, PRODUCT_TYPE_MAX_LENGTH)?,
        })
    }
}

/// Create product use case
pub struct CreateProductUseCase<R>
where
    R: ProductRepository,
{
    repo: Arc<R>,
}

impl<R> CreateProductUseCase<R>
where
    R: ProductRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, input: CreateProductInput) -> CatalogResult<Product> {
        let fields = input.validate()?;
        let product = Product::create(fields, current_timestamp());

        self.repo.insert(&product).await?;

        tracing::info!(
            product_id = %product.id,
            sku = product.sku.as_ref().map(|s| s.as_str()),
            "Product created"
        );

        Ok(product)
    }
}
