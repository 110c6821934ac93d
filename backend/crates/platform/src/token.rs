//! Bearer Token Issuing and Verification
//!
//! Stateless HS256 JWTs. A token carries the subject (user id), the issue
//! time and the expiry; nothing is stored server-side, so there is no
//! revocation before `exp`.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::ErrorKind as JwtErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum signing secret length in bytes (256 bits for HS256)
pub const MIN_SECRET_BYTES: usize = 32;

/// Default token lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// Signing secret rejected at construction
    #[error("Signing secret must be at least {min} bytes (got {actual})")]
    SecretTooShort { min: usize, actual: usize },

    /// Token lifetime must be positive
    #[error("Token lifetime must be positive (got {0}s)")]
    InvalidTtl(i64),

    /// Bad signature, malformed token or missing claims
    #[error("Invalid token")]
    Invalid,

    /// Token is past its `exp`
    #[error("Token expired")]
    Expired,

    /// Encoding failed
    #[error("Token signing failed: {0}")]
    Signing(String),
}

// ============================================================================
// Claims
// ============================================================================

/// Registered claims carried by every token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (Unix seconds)
    pub iat: i64,
    /// Expires at (Unix seconds)
    pub exp: i64,
}

/// A freshly signed token
#[derive(Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    /// Lifetime in seconds
    pub expires_in: i64,
}

impl fmt::Debug for IssuedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IssuedToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

// ============================================================================
// Signer
// ============================================================================

/// HS256 token signer and verifier
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    /// Build a signer from a shared secret and a lifetime in seconds
    pub fn new(secret: &[u8], ttl_secs: i64) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::SecretTooShort {
                min: MIN_SECRET_BYTES,
                actual: secret.len(),
            });
        }
        if ttl_secs <= 0 {
            return Err(TokenError::InvalidTtl(ttl_secs));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Token lifetime in seconds
    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Issue a token for `subject`, valid from now
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token with an explicit issue time
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let iat = issued_at.timestamp();
        let exp = iat + self.ttl.num_seconds();

        let claims = Claims {
            sub: subject.to_string(),
            iat,
            exp,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        let expires_at = Utc
            .timestamp_opt(exp, 0)
            .single()
            .ok_or_else(|| TokenError::Signing(format!("expiry out of range: {exp}")))?;

        Ok(IssuedToken {
            token,
            expires_at,
            expires_in: self.ttl.num_seconds(),
        })
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"[REDACTED]")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
    const OTHER_SECRET: &[u8] = b"fedcba9876543210fedcba9876543210";

    fn signer() -> TokenSigner {
        TokenSigner::new(SECRET, DEFAULT_TOKEN_TTL_SECS).unwrap()
    }

    #[test]
    fn test_issue_and_verify() {
        let signer = signer();
        let issued = signer.issue("user-123").unwrap();

        assert!(!issued.token.is_empty());
        assert_eq!(issued.expires_in, 3600);

        let claims = signer.verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.exp - claims.iat, 3600);
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_short_secret_rejected() {
        let result = TokenSigner::new(b"too-short", 3600);
        assert_eq!(
            result.unwrap_err(),
            TokenError::SecretTooShort { min: 32, actual: 9 }
        );
        assert!(TokenSigner::new(b"", 3600).is_err());
    }

    #[test]
    fn test_non_positive_ttl_rejected() {
        assert_eq!(
            TokenSigner::new(SECRET, 0).unwrap_err(),
            TokenError::InvalidTtl(0)
        );
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let issued = signer
            .issue_at("user-123", Utc::now() - Duration::hours(2))
            .unwrap();

        assert_eq!(signer.verify(&issued.token), Err(TokenError::Expired));
    }

    #[test]
    fn test_different_secret_rejected() {
        let issued = signer().issue("user-123").unwrap();
        let other = TokenSigner::new(OTHER_SECRET, 3600).unwrap();

        assert_eq!(other.verify(&issued.token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_garbage_rejected() {
        let signer = signer();
        assert_eq!(signer.verify(""), Err(TokenError::Invalid));
        assert_eq!(signer.verify("invalid.token.here"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let issued = signer.issue("user-123").unwrap();
        let other = signer.issue("user-456").unwrap();

        // header.payload of one token with the signature of another
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let other_parts: Vec<&str> = other.token.split('.').collect();
        parts[1] = other_parts[1];
        let forged = parts.join(".");

        assert_eq!(signer.verify(&forged), Err(TokenError::Invalid));
    }

    #[test]
    fn test_claims_serialize_registered_names() {
        let claims = Claims {
            sub: "abc".to_string(),
            iat: 1,
            exp: 2,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json, serde_json::json!({ "sub": "abc", "iat": 1, "exp": 2 }));
    }

    #[test]
    fn test_debug_redaction() {
        let signer = signer();
        let issued = signer.issue("user-123").unwrap();

        assert!(!format!("{:?}", signer).contains("0123456789"));
        assert!(!format!("{:?}", issued).contains(&issued.token));
    }
}
