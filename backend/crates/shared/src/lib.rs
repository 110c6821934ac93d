//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary:
//! - Common error types and result aliases
//! - Typed IDs for users and products
//! - Pagination primitives shared by list endpoints
//! - The authenticated principal attached by the auth gate
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod constraint;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
pub mod pagination;
pub mod principal;
