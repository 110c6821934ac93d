//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Body detail shared by every bearer-token rejection
pub const AUTHENTICATION_REQUIRED: &str = "Authentication required";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed username or password at registration
    #[error("{0}")]
    Validation(String),

    /// User name already exists
    #[error("User name already exists")]
    DuplicateUsername,

    /// Unknown user, malformed input or wrong password at login
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Missing or unparseable `Authorization` header
    #[error("Missing bearer token")]
    Unauthenticated,

    /// Bad signature or malformed token
    #[error("Invalid bearer token")]
    InvalidToken,

    /// Token past its expiry
    #[error("Expired bearer token")]
    ExpiredToken,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::DuplicateUsername => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::DuplicateUsername => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::Unauthenticated
            | AuthError::InvalidToken
            | AuthError::ExpiredToken => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Whether this is one of the bearer-token rejections
    pub fn is_token_rejection(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthenticated | AuthError::InvalidToken | AuthError::ExpiredToken
        )
    }

    /// Convert to AppError
    ///
    /// Token rejections share one body, and server errors never carry
    /// storage detail outward.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Unauthenticated | AuthError::InvalidToken | AuthError::ExpiredToken => {
                AppError::unauthorized(AUTHENTICATION_REQUIRED)
                    .with_action("Sign in and send the access token as a Bearer token")
            }
            AuthError::InvalidCredentials => AppError::unauthorized(self.to_string()),
            AuthError::DuplicateUsername => {
                AppError::conflict(self.to_string()).with_action("Choose a different user name")
            }
            AuthError::Validation(msg) => AppError::bad_request(msg.clone()),
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        let challenge = self.is_token_rejection();
        let mut response = self.to_app_error().into_response();
        if challenge {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        response
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl From<platform::token::TokenError> for AuthError {
    fn from(err: platform::token::TokenError) -> Self {
        use platform::token::TokenError;
        match err {
            TokenError::Expired => AuthError::ExpiredToken,
            TokenError::Invalid => AuthError::InvalidToken,
            other => AuthError::Internal(other.to_string()),
        }
    }
}
