//! Value Object Module

pub mod field_error;
pub mod price;
pub mod product_name;
pub mod quantity;
pub mod search_query;
pub mod sku;
pub mod text;

pub use field_error::ProductFieldError;
pub use price::Price;
pub use product_name::ProductName;
pub use quantity::{Quantity, StockChangeError};
pub use search_query::SearchQuery;
pub use sku::Sku;
