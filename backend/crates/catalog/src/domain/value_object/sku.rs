//! SKU Value Object
//!
//! Optional stock-keeping unit. Blank input means "no SKU", so any number of
//! products may have none while a present SKU is unique.

use std::fmt;

use super::field_error::ProductFieldError;

/// Maximum SKU length in characters
pub const SKU_MAX_LENGTH: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Sku(String);

impl Sku {
    /// Parse raw input; `Ok(None)` for blank input
    pub fn parse(input: &str) -> Result<Option<Self>, ProductFieldError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        if trimmed.chars().count() > SKU_MAX_LENGTH {
            return Err(ProductFieldError::SkuTooLong {
                max: SKU_MAX_LENGTH,
            });
        }
        Ok(Some(Self(trimmed.to_string())))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Sku").field(&self.0).finish()
    }
}

impl fmt::Display for Sku {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
