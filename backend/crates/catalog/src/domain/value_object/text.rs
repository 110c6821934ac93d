//! Optional free-text fields (description, image URL, type)

use super::field_error::ProductFieldError;

/// Maximum description length in characters
pub const DESCRIPTION_MAX_LENGTH: usize = 5_000;

/// Maximum image URL length in characters
pub const IMAGE_URL_MAX_LENGTH: usize = 2_048;

/// Maximum product type length in characters
pub const PRODUCT_TYPE_MAX_LENGTH: usize = 100;

/// Trim; blank becomes `None`
pub fn optional_text(
    field: &'static str,
    input: &str,
    max: usize,
) -> Result<Option<String>, ProductFieldError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.chars().count() > max {
        return Err(ProductFieldError::TextTooLong { field, max });
    }
    Ok(Some(trimmed.to_string()))
}
