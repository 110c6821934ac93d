//! Product field validation errors

use thiserror::Error;

/// Why a product field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProductFieldError {
    #[error("Product name is required")]
    NameEmpty,

    #[error("Product name must be at most {max} characters")]
    NameTooLong { max: usize },

    #[error("SKU must be at most {max} characters")]
    SkuTooLong { max: usize },

    #[error("Price must not be negative")]
    NegativePrice,

    #[error("Price must not exceed {max}")]
    PriceTooLarge { max: String },

    #[error("Quantity must be between 0 and {max} (got {value})")]
    QuantityOutOfRange { value: i64, max: i32 },

    #[error("{field} must be at most {max} characters")]
    TextTooLong { field: &'static str, max: usize },

    #[error("At least one field must be provided")]
    EmptyPatch,
}
