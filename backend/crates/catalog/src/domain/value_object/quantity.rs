//! Quantity Value Object
//!
//! Units in stock: `0..=i32::MAX`.

use std::fmt;

use super::field_error::ProductFieldError;

/// Outcome of a rejected stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockChangeError {
    /// Result would be negative
    Insufficient,
    /// Result would exceed the storable maximum
    Overflow,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Quantity(i32);

impl Quantity {
    pub const MAX: i32 = i32::MAX;

    pub fn new(value: i64) -> Result<Self, ProductFieldError> {
        i32::try_from(value)
            .ok()
            .filter(|v| *v >= 0)
            .map(Self)
            .ok_or(ProductFieldError::QuantityOutOfRange {
                value,
                max: Self::MAX,
            })
    }

    /// Create from database values (assumes already validated)
    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }

    /// Apply a relative change
    pub fn adjusted(self, delta: i64) -> Result<Self, StockChangeError> {
        let next = i64::from(self.0).saturating_add(delta);
        if next < 0 {
            return Err(StockChangeError::Insufficient);
        }
        i32::try_from(next)
            .map(Self)
            .map_err(|_| StockChangeError::Overflow)
    }
}

impl fmt::Debug for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quantity({})", self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
