//! Application Layer
//!
//! Use cases and application services.

pub mod adjust_stock;
pub mod config;
pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod inventory_summary;
pub mod list_products;
pub mod update_product;

// Re-exports
pub use adjust_stock::AdjustStockUseCase;
pub use config::CatalogConfig;
pub use create_product::{CreateProductInput, CreateProductUseCase};
pub use delete_product::DeleteProductUseCase;
pub use get_product::GetProductUseCase;
pub use inventory_summary::InventorySummaryUseCase;
pub use list_products::{ListProductsInput, ListProductsUseCase};
pub use update_product::{UpdateProductInput, UpdateProductUseCase};
