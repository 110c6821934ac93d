//! Storage constraint classification
//!
//! Stores enforce uniqueness and numeric bounds themselves (unique indexes,
//! CHECK constraints). Repositories use [`ConstraintViolation`] to turn the
//! resulting database error into a domain error at the store boundary.

/// 制約違反の種別
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintViolation {
    /// Unique index / unique constraint
    Unique { constraint: Option<String> },
    /// CHECK constraint
    Check { constraint: Option<String> },
}

impl ConstraintViolation {
    /// Name of the violated constraint, when the driver reports it
    pub fn constraint(&self) -> Option<&str> {
        match self {
            Self::Unique { constraint } | Self::Check { constraint } => constraint.as_deref(),
        }
    }

    /// `true` for a unique violation on the named constraint
    pub fn is_unique_on(&self, name: &str) -> bool {
        matches!(self, Self::Unique { .. }) && self.constraint() == Some(name)
    }

    /// `true` for a CHECK violation on the named constraint
    pub fn is_check_on(&self, name: &str) -> bool {
        matches!(self, Self::Check { .. }) && self.constraint() == Some(name)
    }
}

#[cfg(feature = "sqlx")]
impl ConstraintViolation {
    /// Classify a sqlx error. Returns `None` for anything that is not a
    /// unique or CHECK violation.
    pub fn from_sqlx(err: &sqlx::Error) -> Option<Self> {
        let sqlx::Error::Database(db_err) = err else {
            return None;
        };

        let constraint = db_err.constraint().map(str::to_owned);
        match db_err.kind() {
            sqlx::error::ErrorKind::UniqueViolation => Some(Self::Unique { constraint }),
            sqlx::error::ErrorKind::CheckViolation => Some(Self::Check { constraint }),
            _ => None,
        }
    }
}
