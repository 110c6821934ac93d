//! Authenticated caller identity
//!
//! Inserted into request extensions by the auth gate and read by protected
//! handlers in other crates.

use crate::id::UserId;

/// The verified subject of a bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Principal {
    pub user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
