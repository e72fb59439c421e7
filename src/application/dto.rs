//! # Catalog Requests
//!
//! Transport-neutral request shapes accepted by the catalog service.
//!
//! Enumerated fields arrive as raw integers and are validated by the
//! service, so out-of-range values surface as validation errors rather
//! than being dropped at the boundary.

use crate::domain::value_objects::Pagination;

/// Lookup of a single exchange.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ExchangeQuery {
    /// Exchange code; empty means no restriction.
    pub code: String,
    /// Status filter, when explicitly set.
    pub status: Option<i32>,
    /// Display filter, when explicitly set.
    pub display: Option<i32>,
}

impl ExchangeQuery {
    /// Creates a lookup by exchange code.
    #[must_use]
    pub fn by_code(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Default::default()
        }
    }
}

/// Fields supplied when creating a product.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CreateProduct {
    /// Product type; must be one of the tradeable types.
    pub product_type: i32,
    /// Owning exchange; required.
    pub exchange_code: String,
    /// Product code; required.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Status; zero selects the default (enabled).
    pub status: i32,
    /// Display flag; zero selects the default (enabled).
    pub display: i32,
    /// Quote currency.
    pub currency_code: String,
    /// Minimum price increment.
    pub tick_unit: f64,
    /// Minimum order size, if any.
    pub minimum_order: Option<f64>,
    /// Icon reference, if any.
    pub icon_id: Option<String>,
}

/// Lookup of a single product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductLookup {
    /// By store-assigned id.
    Id(i64),
    /// By owning exchange and product code.
    Code {
        /// Owning exchange.
        exchange_code: String,
        /// Product code.
        code: String,
    },
}

/// Filtered, paginated product listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductQuery {
    /// Accepted product types; empty means all.
    pub product_types: Vec<i32>,
    /// Accepted owning exchanges; empty means all.
    pub exchange_codes: Vec<String>,
    /// Status filter, when explicitly set.
    pub status: Option<i32>,
    /// Display filter, when explicitly set.
    pub display: Option<i32>,
    /// Requested page.
    pub pagination: Pagination,
}
