//! Infrastructure Layer
//!
//! Database and in-memory implementations.

pub mod memory;
pub mod postgres;

pub use memory::InMemoryProductRepository;
pub use postgres::PgProductRepository;
