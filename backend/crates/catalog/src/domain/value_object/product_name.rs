//! Product Name Value Object

use std::fmt;

use super::field_error::ProductFieldError;

/// Maximum product name length in characters
pub const PRODUCT_NAME_MAX_LENGTH: usize = 200;

/// Trimmed, non-empty product name
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, ProductFieldError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ProductFieldError::NameEmpty);
        }
        if trimmed.chars().count() > PRODUCT_NAME_MAX_LENGTH {
            return Err(ProductFieldError::NameTooLong {
                max: PRODUCT_NAME_MAX_LENGTH,
            });
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ProductName").field(&self.0).finish()
    }
}

impl fmt::Display for ProductName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
