//! Price Value Object
//!
//! Non-negative amount with exactly two fractional digits.

use rust_decimal::{Decimal, RoundingStrategy};
use std::fmt;

use super::field_error::ProductFieldError;

/// Fractional digits kept
pub const PRICE_SCALE: u32 = 2;

/// Largest storable price: 9 999 999 999.99 (`NUMERIC(12, 2)`)
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, PRICE_SCALE)
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Price(Decimal);

impl Price {
    /// Validate and round half away from zero to two places
    pub fn new(value: Decimal) -> Result<Self, ProductFieldError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ProductFieldError::NegativePrice);
        }

        let mut rounded = value
            .round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
            .abs();
        rounded.rescale(PRICE_SCALE);

        if rounded > max_price() {
            return Err(ProductFieldError::PriceTooLarge {
                max: max_price().to_string(),
            });
        }
        Ok(Self(rounded))
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: Decimal) -> Self {
        Self(value)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Debug for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Price({})", self.0)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
