//! Verify Token Use Case
//!
//! Resolves a bearer token to the user it was issued for. Stateless: the
//! store is not consulted.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Verify token use case
pub struct VerifyTokenUseCase {
    config: Arc<AuthConfig>,
}

impl VerifyTokenUseCase {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn execute(&self, token: &str) -> AuthResult<UserId> {
        let claims = self.config.signer.verify(token)?;
        UserId::parse_str(&claims.sub).ok_or(AuthError::InvalidToken)
    }
}
