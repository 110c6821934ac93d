//! Inventory Summary
//!
//! Aggregate figures for the dashboard.

use rust_decimal::Decimal;

/// Whole-catalog totals
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventorySummary {
    /// Number of products
    pub products: u64,
    /// Sum of `price * quantity` over all products
    pub total_inventory_value: Decimal,
    /// Products whose quantity is at or below the low-stock threshold
    pub low_stock: u64,
}

impl InventorySummary {
    /// Summary of an empty catalog
    pub fn empty() -> Self {
        Self {
            products: 0,
            total_inventory_value: Decimal::ZERO,
            low_stock: 0,
        }
    }
}
