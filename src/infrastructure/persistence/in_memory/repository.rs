//! # In-Memory Repository
//!
//! Generic in-memory implementation of [`Repository`] for testing.
//!
//! Records are kept in insertion order, which stands in for the store's
//! default row order. Surrogate ids are assigned from a counter starting at
//! one, and a second record with an existing key is rejected as a duplicate.
//! Filters and pagination follow the same rules as the PostgreSQL
//! implementation.

use crate::domain::entities::{
    Exchange, ExchangeHoliday, GroupPermissionPath, NewExchange, NewExchangeHoliday,
    NewGroupPermissionPath, NewProduct, Product,
};
use crate::domain::value_objects::{Page, Pagination, PaginationInfo};
use crate::infrastructure::persistence::query::{Columns, Filter};
use crate::infrastructure::persistence::traits::{
    Record, Repository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;

/// A record that can be materialized without a database.
pub trait MemoryRecord: Record + Columns {
    /// Builds the stored record from its insertion shape.
    ///
    /// `id` is the next surrogate id; records keyed by a natural key ignore it.
    fn materialize(new: &Self::New, id: u64, now: DateTime<Utc>) -> Self;
}

impl MemoryRecord for Exchange {
    fn materialize(new: &NewExchange, _id: u64, now: DateTime<Utc>) -> Self {
        new.clone().into_exchange(now)
    }
}

impl MemoryRecord for Product {
    fn materialize(new: &NewProduct, id: u64, now: DateTime<Utc>) -> Self {
        new.clone().into_product(id, now)
    }
}

impl MemoryRecord for GroupPermissionPath {
    fn materialize(new: &NewGroupPermissionPath, id: u64, _now: DateTime<Utc>) -> Self {
        new.clone().into_rule(id)
    }
}

impl MemoryRecord for ExchangeHoliday {
    fn materialize(new: &NewExchangeHoliday, id: u64, now: DateTime<Utc>) -> Self {
        new.clone().into_holiday(id, now)
    }
}

/// In-memory implementation of [`Repository`].
///
/// Uses a thread-safe `Vec` for storage. Suitable for unit tests
/// without database dependencies.
pub struct InMemoryRepository<R> {
    storage: Arc<RwLock<Vec<R>>>,
    next_id: Arc<AtomicU64>,
}

impl<R: MemoryRecord> InMemoryRepository<R> {
    /// Creates a new empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }

    /// Returns the number of stored records.
    #[must_use]
    pub async fn len(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Clears all records. The id counter is not reset.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }

    async fn matching(&self, filter: &R::Filter) -> Vec<R> {
        let storage = self.storage.read().await;
        storage
            .iter()
            .filter(|record| filter.matches(*record))
            .cloned()
            .collect()
    }
}

impl<R: MemoryRecord> Default for InMemoryRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for InMemoryRepository<R> {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            next_id: Arc::clone(&self.next_id),
        }
    }
}

impl<R: Record> fmt::Debug for InMemoryRepository<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("entity", &R::ENTITY)
            .field("next_id", &self.next_id.load(Ordering::Relaxed))
            .finish()
    }
}

#[async_trait]
impl<R: MemoryRecord> Repository<R> for InMemoryRepository<R> {
    async fn create(&self, record: &R::New) -> RepositoryResult<R::Key> {
        let mut storage = self.storage.write().await;
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stored = R::materialize(record, id, Utc::now());
        let key = stored.key();
        if storage.iter().any(|existing| existing.key() == key) {
            return Err(RepositoryError::duplicate(
                R::ENTITY,
                format!("{}_pkey ({:?})", R::TABLE, key),
            ));
        }
        storage.push(stored);
        Ok(key)
    }

    async fn get_one(&self, filter: &R::Filter) -> RepositoryResult<Option<R>> {
        let storage = self.storage.read().await;
        Ok(storage.iter().find(|record| filter.matches(*record)).cloned())
    }

    async fn get_many(&self, filter: &R::Filter) -> RepositoryResult<Vec<R>> {
        Ok(self.matching(filter).await)
    }

    async fn get_many_paginated(
        &self,
        filter: &R::Filter,
        pagination: Pagination,
    ) -> RepositoryResult<Page<R>> {
        let rows = self.matching(filter).await;
        let total_count = i64::try_from(rows.len()).unwrap_or(i64::MAX);
        let items = match pagination.window() {
            Some(window) => window.apply(rows),
            None => rows,
        };
        Ok(Page {
            items,
            info: PaginationInfo::new(pagination, total_count),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ProductType, Toggle};
    use crate::infrastructure::persistence::records::{
        ExchangeFilter, GroupPermissionPathFilter, ProductFilter,
    };

    fn product(exchange: &str, code: &str, product_type: ProductType) -> NewProduct {
        NewProduct::new(product_type, exchange, code)
    }

    async fn seeded_products(count: usize) -> InMemoryRepository<Product> {
        let repo = InMemoryRepository::new();
        for n in 0..count {
            repo.create(&product("NYSE", &format!("SYM{n}"), ProductType::Stock))
                .await
                .unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn new_repository_is_empty() {
        let repo = InMemoryRepository::<Exchange>::new();
        assert!(repo.is_empty().await);
        assert!(repo.get_many(&ExchangeFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_assigns_sequential_ids() {
        let repo = InMemoryRepository::<Product>::new();
        let first = repo.create(&product("NYSE", "IBM", ProductType::Stock)).await.unwrap();
        let second = repo.create(&product("NYSE", "GE", ProductType::Stock)).await.unwrap();
        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn create_returns_natural_key() {
        let repo = InMemoryRepository::<Exchange>::new();
        let key = repo.create(&NewExchange::new("LSE", "London")).await.unwrap();
        assert_eq!(key, "LSE");
    }

    #[tokio::test]
    async fn duplicate_exchange_code_rejected() {
        let repo = InMemoryRepository::<Exchange>::new();
        repo.create(&NewExchange::new("LSE", "London")).await.unwrap();
        let err = repo
            .create(&NewExchange::new("LSE", "London again"))
            .await
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn get_one_absent_is_not_an_error() {
        let repo = seeded_products(3).await;
        let filter = ProductFilter::default().with_codes("LSE", "NOPE");
        assert!(repo.get_one(&filter).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_one_returns_first_match_in_insertion_order() {
        let repo = seeded_products(3).await;
        let found = repo.get_one(&ProductFilter::default()).await.unwrap().unwrap();
        assert_eq!(found.code, "SYM0");
    }

    #[tokio::test]
    async fn get_many_applies_conjunction() {
        let repo = InMemoryRepository::<Product>::new();
        repo.create(&product("NYSE", "IBM", ProductType::Stock)).await.unwrap();
        repo.create(&product("CME", "ES", ProductType::Futures)).await.unwrap();
        let mut disabled = product("NYSE", "GE", ProductType::Stock);
        disabled.status = Toggle::Disabled;
        repo.create(&disabled).await.unwrap();

        let filter = ProductFilter::default()
            .with_exchange_codes(["NYSE"])
            .with_status(Toggle::Enabled);
        let rows = repo.get_many(&filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].code, "IBM");

        let futures = ProductFilter::default().with_product_types([ProductType::Futures]);
        assert_eq!(repo.get_many(&futures).await.unwrap()[0].code, "ES");
    }

    #[tokio::test]
    async fn get_many_without_matches_is_empty_list() {
        let repo = seeded_products(2).await;
        let filter = ProductFilter::default().with_product_types([ProductType::Forex]);
        assert_eq!(repo.get_many(&filter).await.unwrap(), Vec::<Product>::new());
    }

    #[tokio::test]
    async fn pagination_reports_offset_but_returns_leading_rows() {
        let repo = seeded_products(25).await;
        let page = repo
            .get_many_paginated(&ProductFilter::default(), Pagination::new(2, 10))
            .await
            .unwrap();
        assert_eq!(page.info.total_count, 25);
        assert_eq!(page.info.offset, 10);
        assert_eq!(page.info.page, 2);
        assert_eq!(page.info.page_size, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].code, "SYM0");
    }

    #[tokio::test]
    async fn pagination_disabled_returns_everything() {
        let repo = seeded_products(4).await;
        let page = repo
            .get_many_paginated(&ProductFilter::default(), Pagination::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 4);
        assert_eq!(page.info.offset, 0);
        assert_eq!(page.info.total_count, 4);
    }

    #[tokio::test]
    async fn total_count_ignores_window_but_honours_filter() {
        let repo = seeded_products(5).await;
        repo.create(&product("CME", "ES", ProductType::Futures)).await.unwrap();
        let filter = ProductFilter::default().with_exchange_codes(["NYSE"]);
        let page = repo
            .get_many_paginated(&filter, Pagination::new(1, 2))
            .await
            .unwrap();
        assert_eq!(page.info.total_count, 5);
        assert_eq!(page.items.len(), 2);
    }

    #[tokio::test]
    async fn repeated_reads_are_identical() {
        let repo = seeded_products(6).await;
        let filter = ProductFilter::default().with_status(Toggle::Enabled);
        let first = repo.get_many(&filter).await.unwrap();
        let second = repo.get_many(&filter).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(
            repo.get_one(&filter).await.unwrap(),
            repo.get_one(&filter).await.unwrap()
        );
    }

    #[tokio::test]
    async fn permission_paths_filter_by_group() {
        let repo = InMemoryRepository::<GroupPermissionPath>::new();
        repo.create(&NewGroupPermissionPath::new(1, "GET", "/products"))
            .await
            .unwrap();
        repo.create(&NewGroupPermissionPath::new(2, "POST", "/products"))
            .await
            .unwrap();
        let filter = GroupPermissionPathFilter::default().with_group(2);
        let rows = repo.get_many(&filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].method, "POST");
    }

    #[tokio::test]
    async fn len_waits_for_a_writer_holding_the_lock() {
        let repo = InMemoryRepository::<Exchange>::new();
        let mut guard = repo.storage.write().await;
        let reader = repo.clone();
        let len = tokio::spawn(async move { reader.len().await });
        tokio::task::yield_now().await;
        guard.push(NewExchange::new("LSE", "London").into_exchange(Utc::now()));
        drop(guard);
        assert_eq!(len.await.unwrap(), 1);
    }

    #[tokio::test]
    async fn clear_keeps_id_counter() {
        let repo = seeded_products(2).await;
        repo.clear().await;
        assert!(repo.is_empty().await);
        let id = repo.create(&product("NYSE", "IBM", ProductType::Stock)).await.unwrap();
        assert_eq!(id, 3);
    }
}
