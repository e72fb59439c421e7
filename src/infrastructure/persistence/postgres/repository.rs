//! # PostgreSQL Repository
//!
//! PostgreSQL implementation of [`Repository`] using sqlx.
//!
//! Every statement is composed with `sqlx::QueryBuilder`: the record's
//! column list, then the filter's `WHERE` clause with bound parameters,
//! then the optional limit. No `ORDER BY` is applied, so multi-row results
//! come back in the store's default order.

use crate::domain::value_objects::{Page, Pagination, PaginationInfo};
use crate::infrastructure::persistence::postgres::rows::PgRecord;
use crate::infrastructure::persistence::query::{Filter, push_where};
use crate::infrastructure::persistence::traits::{Repository, RepositoryError, RepositoryResult};
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::fmt;
use std::marker::PhantomData;

/// PostgreSQL implementation of [`Repository`].
///
/// Uses connection pooling via `sqlx::PgPool`; each call checks out a
/// connection for the duration of its statements only.
///
/// # Examples
///
/// ```ignore
/// use sqlx::PgPool;
/// use product_catalog::domain::entities::Product;
/// use product_catalog::infrastructure::persistence::postgres::PgRepository;
///
/// let pool = PgPool::connect("postgres://...").await?;
/// let products = PgRepository::<Product>::new(pool);
/// ```
pub struct PgRepository<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: PgRecord> PgRepository<R> {
    /// Creates a repository over the pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    /// Returns a reference to the connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Builds `SELECT <columns> FROM <table> WHERE ...` for a filter.
    #[must_use]
    pub fn select_query(filter: &R::Filter) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT {} FROM {}", R::COLUMNS, R::TABLE));
        push_where(&mut builder, R::TABLE, filter.conditions());
        builder
    }

    /// Builds `SELECT COUNT(*) FROM <table> WHERE ...` for a filter.
    #[must_use]
    pub fn count_query(filter: &R::Filter) -> QueryBuilder<'static, Postgres> {
        let mut builder = QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", R::TABLE));
        push_where(&mut builder, R::TABLE, filter.conditions());
        builder
    }

    /// Builds the paginated select for a filter.
    ///
    /// Only `LIMIT` is rendered: the first `limit` matching rows are
    /// returned for every page number.
    #[must_use]
    pub fn page_query(filter: &R::Filter, pagination: Pagination) -> QueryBuilder<'static, Postgres> {
        let mut builder = Self::select_query(filter);
        if let Some(window) = pagination.window() {
            builder.push(" LIMIT ").push_bind(window.limit);
        }
        builder
    }

    fn map_error(err: sqlx::Error) -> RepositoryError {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => RepositoryError::duplicate(
                R::ENTITY,
                db.constraint().unwrap_or_else(|| db.message()).to_string(),
            ),
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => RepositoryError::connection(err.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                RepositoryError::serialization(err.to_string())
            }
            _ => RepositoryError::query(err.to_string()),
        }
    }

    async fn fetch_all(&self, mut builder: QueryBuilder<'static, Postgres>) -> RepositoryResult<Vec<R>> {
        let rows: Vec<R::Row> = builder
            .build_query_as::<R::Row>()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::map_error)?;
        rows.into_iter().map(R::from_row).collect()
    }
}

impl<R> Clone for PgRepository<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

impl<R: PgRecord> fmt::Debug for PgRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PgRepository")
            .field("table", &R::TABLE)
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

#[async_trait]
impl<R: PgRecord> Repository<R> for PgRepository<R> {
    async fn create(&self, record: &R::New) -> RepositoryResult<R::Key> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("INSERT INTO {} ", R::TABLE));
        R::push_insert(record, &mut builder);
        builder.push(format!(" RETURNING {}", R::KEY_COLUMN));

        let row = builder
            .build()
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_error)?;
        let key = R::key_from_row(&row)?;
        tracing::debug!(table = R::TABLE, key = ?key, "inserted row");
        Ok(key)
    }

    async fn get_one(&self, filter: &R::Filter) -> RepositoryResult<Option<R>> {
        let mut builder = Self::select_query(filter);
        builder.push(" LIMIT 1");
        let row: Option<R::Row> = builder
            .build_query_as::<R::Row>()
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::map_error)?;
        row.map(R::from_row).transpose()
    }

    async fn get_many(&self, filter: &R::Filter) -> RepositoryResult<Vec<R>> {
        self.fetch_all(Self::select_query(filter)).await
    }

    async fn get_many_paginated(
        &self,
        filter: &R::Filter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<R>> {
        let total_count: i64 = Self::count_query(filter)
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await
            .map_err(Self::map_error)?;

        let items = self.fetch_all(Self::page_query(filter, pagination)).await?;
        tracing::debug!(
            table = R::TABLE,
            total_count,
            returned = items.len(),
            "fetched page"
        );

        Ok(Page {
            items,
            info: PaginationInfo::new(pagination, total_count),
        })
    }
}
