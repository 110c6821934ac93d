//! Product Entity

use chrono::{DateTime, SubsecRound, Utc};
use kernel::id::ProductId;

use crate::domain::value_object::{Price, ProductFieldError, ProductName, Quantity, Sku};

/// Current time at the precision the store keeps (microseconds)
pub fn current_timestamp() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    /// Unique when present
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Price,
    pub quantity: Quantity,
    pub image_url: Option<String>,
    /// Free-form category
    pub product_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields of a product about to be created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: ProductName,
    pub sku: Option<Sku>,
    pub description: Option<String>,
    pub price: Price,
    pub quantity: Quantity,
    pub image_url: Option<String>,
    pub product_type: Option<String>,
}

impl Product {
    /// Assign an id and timestamps
    pub fn create(fields: NewProduct, now: DateTime<Utc>) -> Self {
        Self {
            id: ProductId::new(),
            name: fields.name,
            sku: fields.sku,
            description: fields.description,
            price: fields.price,
            quantity: fields.quantity,
            image_url: fields.image_url,
            product_type: fields.product_type,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch and refresh `updated_at`
    pub fn apply(&mut self, patch: &ProductPatch, now: DateTime<Utc>) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(sku) = &patch.sku {
            self.sku = sku.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
        if let Some(image_url) = &patch.image_url {
            self.image_url = image_url.clone();
        }
        if let Some(product_type) = &patch.product_type {
            self.product_type = product_type.clone();
        }
        self.updated_at = now;
    }
}

/// Validated partial update
///
/// Outer `None` leaves a field unchanged. For optional fields,
/// `Some(None)` clears the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<ProductName>,
    pub sku: Option<Option<Sku>>,
    pub description: Option<Option<String>>,
    pub price: Option<Price>,
    pub quantity: Option<Quantity>,
    pub image_url: Option<Option<String>>,
    pub product_type: Option<Option<String>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sku.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.quantity.is_none()
            && self.image_url.is_none()
            && self.product_type.is_none()
    }

    /// Reject a patch that would change nothing
    pub fn ensure_not_empty(self) -> Result<Self, ProductFieldError> {
        if self.is_empty() {
            return Err(ProductFieldError::EmptyPatch);
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn widget() -> Product {
        Product::create(
            NewProduct {
                name: ProductName::new("Widget").unwrap(),
                sku: Sku::parse("WID-1").unwrap(),
                description: Some("Blue".to_string()),
                price: Price::new(Decimal::new(1999, 2)).unwrap(),
                quantity: Quantity::new(3).unwrap(),
                image_url: None,
                product_type: None,
            },
            current_timestamp(),
        )
    }

    #[test]
    fn test_timestamps_have_microsecond_precision() {
        let product = widget();
        assert_eq!(product.created_at.timestamp_subsec_nanos() % 1_000, 0);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[test]
    fn test_apply_changes_only_present_fields() {
        let mut product = widget();
        let before = product.clone();
        let later = product.created_at + Duration::seconds(5);

        let patch = ProductPatch {
            quantity: Some(Quantity::new(5).unwrap()),
            description: Some(None),
            ..Default::default()
        };
        product.apply(&patch, later);

        assert_eq!(product.quantity.value(), 5);
        assert_eq!(product.description, None);
        assert_eq!(product.name, before.name);
        assert_eq!(product.sku, before.sku);
        assert_eq!(product.created_at, before.created_at);
        assert_eq!(product.updated_at, later);
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        assert_eq!(
            ProductPatch::default().ensure_not_empty(),
            Err(ProductFieldError::EmptyPatch)
        );
    }
}
