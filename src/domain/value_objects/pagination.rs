//! # Pagination
//!
//! Page requests and the metadata reported back with paginated results.
//!
//! A [`Pagination`] with a page or page size below one requests no
//! pagination at all. Otherwise it resolves to a [`PageWindow`] with
//! `offset = (page - 1) * page_size` and `limit = page_size`.
//!
//! Only the limit of a window restricts rows: the first `limit` matching
//! rows are returned for every page number, while the computed offset is
//! reported in [`PaginationInfo`].
//!
//! # Examples
//!
//! ```
//! use product_catalog::domain::value_objects::pagination::{Pagination, PaginationInfo};
//!
//! let pagination = Pagination::new(2, 10);
//! let window = pagination.window().unwrap();
//! assert_eq!(window.offset, 10);
//! assert_eq!(window.limit, 10);
//!
//! let info = PaginationInfo::new(pagination, 25);
//! assert_eq!(info.total_count, 25);
//! assert_eq!(info.offset, 10);
//! ```

use serde::{Deserialize, Serialize};

/// Requested page of a multi-row query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based page number.
    pub page: i32,
    /// Rows per page.
    pub page_size: i32,
}

impl Pagination {
    /// Creates a page request.
    #[must_use]
    pub const fn new(page: i32, page_size: i32) -> Self {
        Self { page, page_size }
    }

    /// Resolves the request into an offset/limit window.
    ///
    /// Returns `None` when the page or the page size is below one.
    #[must_use]
    pub fn window(&self) -> Option<PageWindow> {
        if self.page < 1 || self.page_size < 1 {
            return None;
        }
        let page_size = i64::from(self.page_size);
        Some(PageWindow {
            offset: (i64::from(self.page) - 1) * page_size,
            limit: page_size,
        })
    }
}

/// Offset and limit computed from a [`Pagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Number of rows preceding the requested page.
    pub offset: i64,
    /// Maximum number of rows returned.
    pub limit: i64,
}

impl PageWindow {
    /// Applies the window to rows already in store order.
    ///
    /// Mirrors the SQL rendering: rows are truncated to `limit`, never skipped.
    pub fn apply<T>(&self, rows: impl IntoIterator<Item = T>) -> Vec<T> {
        let limit = usize::try_from(self.limit).unwrap_or(usize::MAX);
        rows.into_iter().take(limit).collect()
    }
}

/// Pagination metadata returned alongside a page of rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PaginationInfo {
    /// Requested page number.
    pub page: i32,
    /// Requested page size.
    pub page_size: i32,
    /// Rows matching the filter, regardless of pagination.
    pub total_count: i64,
    /// Computed offset, zero when no pagination applies.
    pub offset: i64,
}

impl PaginationInfo {
    /// Builds the metadata for a request and its total match count.
    #[must_use]
    pub fn new(pagination: Pagination, total_count: i64) -> Self {
        Self {
            page: pagination.page,
            page_size: pagination.page_size,
            total_count,
            offset: pagination.window().map_or(0, |w| w.offset),
        }
    }
}

/// A page of rows plus its pagination metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows of the page, in store order.
    pub items: Vec<T>,
    /// Pagination metadata.
    pub info: PaginationInfo,
}

impl<T> Page<T> {
    /// Maps every row of the page, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            info: self.info,
        }
    }
}
