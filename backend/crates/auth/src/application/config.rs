//! Application Configuration
//!
//! Configuration for the Auth application layer.

use platform::token::{DEFAULT_TOKEN_TTL_SECS, TokenError, TokenSigner};
use std::fmt;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Access token signer (HS256)
    pub signer: TokenSigner,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl AuthConfig {
    /// Build the config from a signing secret
    ///
    /// Fails when the secret is shorter than 32 bytes or the TTL is not
    /// positive.
    pub fn new(
        token_secret: &[u8],
        token_ttl_secs: i64,
        password_pepper: Option<Vec<u8>>,
    ) -> Result<Self, TokenError> {
        Ok(Self {
            signer: TokenSigner::new(token_secret, token_ttl_secs)?,
            password_pepper: password_pepper.filter(|p| !p.is_empty()),
        })
    }

    /// Config with the default one-hour token lifetime and no pepper
    pub fn with_secret(token_secret: &[u8]) -> Result<Self, TokenError> {
        Self::new(token_secret, DEFAULT_TOKEN_TTL_SECS, None)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signer", &self.signer)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}
