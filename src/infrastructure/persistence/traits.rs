//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! Every catalog entity is served by the same generic [`Repository`] port,
//! parameterized by a [`Record`] type that names the entity's key, its
//! insertion shape and its filter. Implementations exist for PostgreSQL
//! and for in-memory storage.
//!
//! # Examples
//!
//! ```ignore
//! use product_catalog::domain::entities::Product;
//! use product_catalog::domain::value_objects::Toggle;
//! use product_catalog::infrastructure::persistence::{ProductFilter, Repository};
//!
//! async fn enabled_products(repo: &dyn Repository<Product>) {
//!     let filter = ProductFilter::default().with_status(Toggle::Enabled);
//!     let products = repo.get_many(&filter).await.unwrap();
//!     println!("Found {} products", products.len());
//! }
//! ```

use crate::domain::value_objects::{Page, Pagination};
use crate::infrastructure::persistence::query::Filter;
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A uniqueness constraint rejected the write.
    #[error("Duplicate entity: {entity_type} violates {constraint}")]
    Duplicate {
        /// Type of entity.
        entity_type: &'static str,
        /// Violated constraint or key.
        constraint: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("Query error: {0}")]
    Query(String),

    /// A stored value could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl RepositoryError {
    /// Creates a duplicate error.
    #[must_use]
    pub fn duplicate(entity_type: &'static str, constraint: impl Into<String>) -> Self {
        Self::Duplicate {
            entity_type,
            constraint: constraint.into(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Returns true if this is a duplicate error.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Duplicate { .. })
    }

    /// Returns true if the store could not be reached.
    #[must_use]
    pub fn is_connection(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// A persisted entity served through [`Repository`].
pub trait Record: Clone + Send + Sync + fmt::Debug + 'static {
    /// Natural or surrogate key returned by [`Repository::create`].
    type Key: Clone + PartialEq + Send + Sync + fmt::Debug;

    /// Fields supplied on creation.
    type New: Clone + Send + Sync + fmt::Debug;

    /// Filter accepted by the read operations.
    type Filter: Filter;

    /// Entity name used in errors and logs.
    const ENTITY: &'static str;

    /// Backing table.
    const TABLE: &'static str;

    /// Returns the key of this record.
    fn key(&self) -> Self::Key;
}

/// Create and query operations for one entity type.
///
/// Read operations never mutate. `create` is a single-row insert with no
/// secondary writes.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync + fmt::Debug {
    /// Inserts a record and returns its key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Duplicate` on a uniqueness violation and
    /// `RepositoryError::Connection` or `RepositoryError::Query` when the
    /// store fails.
    async fn create(&self, record: &R::New) -> RepositoryResult<R::Key>;

    /// Returns the first record matching the filter.
    ///
    /// Returns `None` when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` when the store fails.
    async fn get_one(&self, filter: &R::Filter) -> RepositoryResult<Option<R>>;

    /// Returns every record matching the filter, in store order.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` when the store fails.
    async fn get_many(&self, filter: &R::Filter) -> RepositoryResult<Vec<R>>;

    /// Returns a page of matching records with the total match count.
    ///
    /// The count is taken before the page is fetched and ignores pagination.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` when either round-trip fails.
    async fn get_many_paginated(
        &self,
        filter: &R::Filter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<R>>;
}
