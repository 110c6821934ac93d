//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database and in-memory implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer gate
//!
//! ## Features
//! - User registration and login with username + password
//! - Stateless HS256 bearer tokens (1 hour by default)
//! - `require_bearer` middleware guarding other crates' routes
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown user and wrong password are indistinguishable (body and timing)
//! - Every token rejection yields the same 401

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::InMemoryAuthRepository, postgres::PgAuthRepository};
pub use presentation::router::auth_router;

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
