//! Entity Module

pub mod product;
pub mod summary;

pub use product::{NewProduct, Product, ProductPatch};
pub use summary::InventorySummary;
