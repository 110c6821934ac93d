//! Catalog Error Types
//!
//! Catalog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::pagination::PageParamError;
use thiserror::Error;

use crate::domain::value_object::ProductFieldError;

/// Catalog-specific result type alias
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Catalog-specific error variants
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Rejected input
    #[error("{0}")]
    Validation(String),

    /// SKU already used by another product
    #[error("A product with this SKU already exists")]
    DuplicateSku,

    /// Unknown or malformed product id
    #[error("Product not found")]
    NotFound,

    /// Stock would go below zero
    #[error("Insufficient stock")]
    InsufficientStock,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CatalogError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::Validation(_) => StatusCode::BAD_REQUEST,
            CatalogError::DuplicateSku | CatalogError::InsufficientStock => StatusCode::CONFLICT,
            CatalogError::NotFound => StatusCode::NOT_FOUND,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::Validation(_) => ErrorKind::BadRequest,
            CatalogError::DuplicateSku | CatalogError::InsufficientStock => ErrorKind::Conflict,
            CatalogError::NotFound => ErrorKind::NotFound,
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CatalogError::Validation(msg) => AppError::bad_request(msg.clone()),
            CatalogError::DuplicateSku => {
                AppError::conflict(self.to_string()).with_action("Choose a different SKU")
            }
            CatalogError::NotFound => AppError::not_found(self.to_string()),
            CatalogError::InsufficientStock => AppError::conflict(self.to_string())
                .with_action("Reduce the quantity removed from stock"),
            CatalogError::Database(_) | CatalogError::Internal(_) => {
                AppError::internal("Internal server error")
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CatalogError::Database(e) => {
                tracing::error!(error = %e, "Catalog database error");
            }
            CatalogError::Internal(msg) => {
                tracing::error!(message = %msg, "Catalog internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Catalog error");
            }
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<ProductFieldError> for CatalogError {
    fn from(err: ProductFieldError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

impl From<PageParamError> for CatalogError {
    fn from(err: PageParamError) -> Self {
        CatalogError::Validation(err.to_string())
    }
}

impl From<AppError> for CatalogError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => CatalogError::Validation(err.message().to_string()),
            _ => CatalogError::Internal(err.to_string()),
        }
    }
}
