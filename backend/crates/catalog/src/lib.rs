//! Catalog (Product Inventory) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Product entity, value objects, repository trait
//! - `application/` - Use cases and paging configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Product CRUD with partial updates
//! - Atomic relative stock changes that never go below zero
//! - Paginated listing with relevance-ranked full-text search
//!
//! Every route expects a `kernel::principal::Principal` in the request
//! extensions; mount the router behind the bearer gate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::CatalogConfig;
pub use error::{CatalogError, CatalogResult};
pub use infra::{memory::InMemoryProductRepository, postgres::PgProductRepository};
pub use presentation::router::catalog_router;
