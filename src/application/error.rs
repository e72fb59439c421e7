//! # Application Errors
//!
//! Error types for the catalog use cases.
//!
//! # Error Hierarchy
//!
//! ```text
//! CatalogError
//! ├── Validation(String)               - Missing or invalid required parameter
//! ├── Persistence(RepositoryError)     - Store connectivity or constraint failure
//! └── NotImplemented(&'static str)     - Declared operation without behaviour
//! ```
//!
//! Absent records are not errors: lookups return `Ok(None)`.
//!
//! # Examples
//!
//! ```
//! use product_catalog::application::error::CatalogError;
//! use product_catalog::infrastructure::persistence::RepositoryError;
//!
//! let err = CatalogError::validation("exchange code is required");
//! assert!(err.is_validation());
//!
//! let err: CatalogError = RepositoryError::connection("pool timed out").into();
//! assert!(err.is_persistence());
//! ```

use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// The store rejected or failed the operation.
    #[error("persistence error: {0}")]
    Persistence(#[from] RepositoryError),

    /// The operation is part of the contract but has no behaviour.
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
}

impl CatalogError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not implemented error for an operation.
    #[must_use]
    pub fn not_implemented(operation: &'static str) -> Self {
        Self::NotImplemented(operation)
    }

    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a persistence error.
    #[must_use]
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence(_))
    }

    /// Returns true if this is a not implemented error.
    #[must_use]
    pub fn is_not_implemented(&self) -> bool {
        matches!(self, Self::NotImplemented(_))
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error() {
        let err = CatalogError::validation("product type out of range");
        assert!(err.to_string().contains("validation"));
        assert!(err.to_string().contains("product type out of range"));
        assert!(err.is_validation());
        assert!(!err.is_persistence());
    }

    #[test]
    fn persistence_error_from_repository_error() {
        let repo_err = RepositoryError::duplicate("Exchange", "exchange_pkey");
        let err: CatalogError = repo_err.into();
        assert!(err.is_persistence());
        assert!(err.to_string().contains("exchange_pkey"));
    }

    #[test]
    fn not_implemented_error() {
        let err = CatalogError::not_implemented("ModifyProduct");
        assert_eq!(err.to_string(), "not implemented: ModifyProduct");
        assert!(err.is_not_implemented());
    }
}
