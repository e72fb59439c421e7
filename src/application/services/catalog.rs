//! # Catalog Service
//!
//! Use cases for exchanges and products.
//!
//! The service validates and defaults request fields, turns them into
//! repository filters or insertion records, and hands back domain
//! entities. It holds no state of its own; every call goes to the store.
//!
//! # Examples
//!
//! ```ignore
//! use std::sync::Arc;
//! use product_catalog::application::dto::ProductLookup;
//! use product_catalog::application::services::CatalogService;
//! use product_catalog::infrastructure::persistence::InMemoryRepository;
//!
//! let service = CatalogService::new(
//!     Arc::new(InMemoryRepository::new()),
//!     Arc::new(InMemoryRepository::new()),
//! );
//! let product = service.get_product(&ProductLookup::Id(1)).await?;
//! ```

use crate::application::dto::{CreateProduct, ExchangeQuery, ProductLookup, ProductQuery};
use crate::application::error::{CatalogError, CatalogResult};
use crate::domain::entities::{Exchange, NewProduct, Product};
use crate::domain::value_objects::{Page, Pagination, ProductType, Toggle};
use crate::infrastructure::persistence::{ExchangeFilter, ProductFilter, Repository};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Catalog use cases over the exchange and product repositories.
#[derive(Debug, Clone)]
pub struct CatalogService {
    exchanges: Arc<dyn Repository<Exchange>>,
    products: Arc<dyn Repository<Product>>,
}

impl CatalogService {
    /// Creates a service over the given repositories.
    #[must_use]
    pub fn new(
        exchanges: Arc<dyn Repository<Exchange>>,
        products: Arc<dyn Repository<Product>>,
    ) -> Self {
        Self {
            exchanges,
            products,
        }
    }

    /// Fetches the first exchange matching code, status and display.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for an out-of-range status or
    /// display and `CatalogError::Persistence` if the store fails.
    pub async fn get_exchange(&self, query: &ExchangeQuery) -> CatalogResult<Option<Exchange>> {
        let filter = ExchangeFilter {
            code: Some(query.code.clone()),
            status: optional_toggle("status", query.status)?,
            display: optional_toggle("display", query.display)?,
        };
        tracing::debug!(
            code = %query.code,
            status = ?filter.status,
            display = ?filter.display,
            "get exchange"
        );

        let exchange = self.exchanges.get_one(&filter).await?;
        if exchange.is_none() {
            tracing::debug!(code = %query.code, "exchange not found");
        }
        Ok(exchange)
    }

    /// Lists every exchange, one page at a time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Persistence` if the store fails.
    pub async fn get_exchanges(&self, pagination: Pagination) -> CatalogResult<Page<Exchange>> {
        tracing::debug!(page = pagination.page, page_size = pagination.page_size, "get exchanges");
        let page = self
            .exchanges
            .get_many_paginated(&ExchangeFilter::default(), pagination)
            .await?;
        Ok(page)
    }

    /// Validates and stores a new product, returning its id.
    ///
    /// Unset status and display default to enabled.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` if the type is not tradeable, the
    /// exchange code or code is empty, a flag is out of range, or a
    /// quantity is not a finite number. Returns `CatalogError::Persistence`
    /// if the insert fails.
    pub async fn create_product(&self, request: CreateProduct) -> CatalogResult<u64> {
        let product_type = ProductType::try_from(request.product_type)
            .ok()
            .filter(|t| t.is_tradeable())
            .ok_or_else(|| invalid_parameter("type"))?;
        if request.exchange_code.is_empty() {
            return Err(invalid_parameter("exchange_code"));
        }
        if request.code.is_empty() {
            return Err(invalid_parameter("code"));
        }

        let record = NewProduct {
            product_type,
            exchange_code: request.exchange_code,
            code: request.code,
            name: request.name,
            status: defaulted_toggle("status", request.status)?,
            display: defaulted_toggle("display", request.display)?,
            currency_code: request.currency_code,
            tick_unit: to_decimal("tick_unit", request.tick_unit)?,
            minimum_order: request
                .minimum_order
                .map(|value| to_decimal("minimum_order", value))
                .transpose()?,
            icon_id: request.icon_id,
        };

        let id = self.products.create(&record).await?;
        tracing::info!(
            id,
            exchange_code = %record.exchange_code,
            code = %record.code,
            "product created"
        );
        Ok(id)
    }

    /// Fetches one product by id or by exchange and code.
    ///
    /// The code lookup matches both the exchange code and the product code
    /// against the requested exchange code, so it only finds products whose
    /// code equals their exchange code.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for a negative id and
    /// `CatalogError::Persistence` if the store fails.
    pub async fn get_product(&self, lookup: &ProductLookup) -> CatalogResult<Option<Product>> {
        let filter = match lookup {
            ProductLookup::Id(id) => {
                let id = u64::try_from(*id).map_err(|_| invalid_parameter("id"))?;
                ProductFilter::default().with_id(id)
            }
            ProductLookup::Code { exchange_code, .. } => {
                ProductFilter::default().with_codes(exchange_code.as_str(), exchange_code.as_str())
            }
        };
        tracing::debug!(?lookup, "get product");

        let product = self.products.get_one(&filter).await?;
        Ok(product)
    }

    /// Lists products matching types, exchanges, status and display.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for an unknown product type or an
    /// out-of-range flag and `CatalogError::Persistence` if the store fails.
    pub async fn get_products(&self, query: &ProductQuery) -> CatalogResult<Page<Product>> {
        let product_types = query
            .product_types
            .iter()
            .map(|value| ProductType::try_from(*value).map_err(|_| invalid_parameter("product_type")))
            .collect::<CatalogResult<Vec<_>>>()?;

        let filter = ProductFilter {
            product_types,
            exchange_codes: query.exchange_codes.clone(),
            status: optional_toggle("status", query.status)?,
            display: optional_toggle("display", query.display)?,
            ..Default::default()
        };
        tracing::debug!(
            product_types = ?filter.product_types,
            exchange_codes = ?filter.exchange_codes,
            page = query.pagination.page,
            page_size = query.pagination.page_size,
            "get products"
        );

        let page = self
            .products
            .get_many_paginated(&filter, query.pagination)
            .await?;
        Ok(page)
    }

    /// Changes a product. Not available.
    ///
    /// # Errors
    ///
    /// Always returns `CatalogError::NotImplemented`.
    pub fn modify_product(&self, id: i64) -> CatalogResult<()> {
        tracing::debug!(id, "modify product requested");
        Err(CatalogError::not_implemented("ModifyProduct"))
    }

    /// Removes a product. Not available.
    ///
    /// # Errors
    ///
    /// Always returns `CatalogError::NotImplemented`.
    pub fn delete_product(&self, id: i64) -> CatalogResult<()> {
        tracing::debug!(id, "delete product requested");
        Err(CatalogError::not_implemented("DeleteProduct"))
    }
}

fn invalid_parameter(field: &str) -> CatalogError {
    CatalogError::validation(format!("missing or invalid required parameter: {}", field))
}

/// Zero and absent both mean "no filter".
fn optional_toggle(field: &str, value: Option<i32>) -> CatalogResult<Option<Toggle>> {
    match value {
        None | Some(0) => Ok(None),
        Some(raw) => Toggle::try_from(raw)
            .map(Some)
            .map_err(|_| invalid_parameter(field)),
    }
}

fn defaulted_toggle(field: &str, value: i32) -> CatalogResult<Toggle> {
    Ok(optional_toggle(field, Some(value))?.unwrap_or_default())
}

fn to_decimal(field: &str, value: f64) -> CatalogResult<Decimal> {
    Decimal::try_from(value).map_err(|_| invalid_parameter(field))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::NewExchange;
    use crate::infrastructure::persistence::InMemoryRepository;
    use std::str::FromStr;

    struct Fixture {
        service: CatalogService,
        exchanges: InMemoryRepository<Exchange>,
        products: InMemoryRepository<Product>,
    }

    fn fixture() -> Fixture {
        let exchanges = InMemoryRepository::new();
        let products = InMemoryRepository::new();
        let service = CatalogService::new(Arc::new(exchanges.clone()), Arc::new(products.clone()));
        Fixture {
            service,
            exchanges,
            products,
        }
    }

    fn create(product_type: i32, exchange_code: &str, code: &str) -> CreateProduct {
        CreateProduct {
            product_type,
            exchange_code: exchange_code.to_string(),
            code: code.to_string(),
            name: code.to_string(),
            currency_code: "USD".to_string(),
            tick_unit: 0.01,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_product_rejects_untradeable_type() {
        let f = fixture();
        for product_type in [0, 5, -1] {
            let err = f
                .service
                .create_product(create(product_type, "NYSE", "AAPL"))
                .await
                .unwrap_err();
            assert!(err.is_validation());
        }
        assert!(f.products.is_empty().await);
    }

    #[tokio::test]
    async fn create_product_requires_exchange_and_code() {
        let f = fixture();
        let err = f.service.create_product(create(1, "", "AAPL")).await.unwrap_err();
        assert!(err.to_string().contains("exchange_code"));
        let err = f.service.create_product(create(1, "NYSE", "")).await.unwrap_err();
        assert!(err.to_string().contains("code"));
    }

    #[tokio::test]
    async fn create_product_defaults_status_and_display() {
        let f = fixture();
        let id = f.service.create_product(create(2, "NYSE", "AAPL")).await.unwrap();

        let stored = f
            .products
            .get_one(&ProductFilter::default().with_id(id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.product_type, ProductType::Crypto);
        assert_eq!(stored.status, Toggle::Enabled);
        assert_eq!(stored.display, Toggle::Enabled);
        assert_eq!(stored.tick_unit, Decimal::from_str("0.01").unwrap());
        assert_eq!(stored.minimum_order, None);
        assert_eq!(stored.icon_id, None);
    }

    #[tokio::test]
    async fn create_product_keeps_optional_fields() {
        let f = fixture();
        let mut request = create(1, "NYSE", "IBM");
        request.status = 2;
        request.minimum_order = Some(5.0);
        request.icon_id = Some("ibm.png".to_string());
        let id = f.service.create_product(request).await.unwrap();

        let stored = f
            .service
            .get_product(&ProductLookup::Id(i64::try_from(id).unwrap()))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, Toggle::Disabled);
        assert_eq!(stored.display, Toggle::Enabled);
        assert_eq!(stored.minimum_order, Some(Decimal::from(5)));
        assert_eq!(stored.icon_id.as_deref(), Some("ibm.png"));
    }

    #[tokio::test]
    async fn create_product_rejects_bad_flags_and_quantities() {
        let f = fixture();
        let mut request = create(1, "NYSE", "IBM");
        request.display = 3;
        assert!(f.service.create_product(request).await.unwrap_err().is_validation());

        let mut request = create(1, "NYSE", "IBM");
        request.tick_unit = f64::NAN;
        assert!(f.service.create_product(request).await.unwrap_err().is_validation());

        let mut request = create(1, "NYSE", "IBM");
        request.minimum_order = Some(f64::INFINITY);
        assert!(f.service.create_product(request).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn get_product_by_code_matches_exchange_code_twice() {
        let f = fixture();
        f.service.create_product(create(1, "NASDAQ", "MSFT")).await.unwrap();

        let lookup = ProductLookup::Code {
            exchange_code: "NASDAQ".to_string(),
            code: "MSFT".to_string(),
        };
        assert!(f.service.get_product(&lookup).await.unwrap().is_none());

        f.service.create_product(create(1, "NASDAQ", "NASDAQ")).await.unwrap();
        let found = f.service.get_product(&lookup).await.unwrap().unwrap();
        assert_eq!(found.code, "NASDAQ");
    }

    #[tokio::test]
    async fn get_product_by_id() {
        let f = fixture();
        f.service.create_product(create(1, "NYSE", "IBM")).await.unwrap();
        let id = f.service.create_product(create(1, "NYSE", "GE")).await.unwrap();

        let lookup = ProductLookup::Id(i64::try_from(id).unwrap());
        assert_eq!(f.service.get_product(&lookup).await.unwrap().unwrap().code, "GE");
        assert!(f.service.get_product(&ProductLookup::Id(99)).await.unwrap().is_none());
        assert!(
            f.service
                .get_product(&ProductLookup::Id(-1))
                .await
                .unwrap_err()
                .is_validation()
        );
    }

    #[tokio::test]
    async fn get_products_filters_by_every_field() {
        let f = fixture();
        f.service.create_product(create(1, "NYSE", "IBM")).await.unwrap();
        f.service.create_product(create(4, "CME", "ES")).await.unwrap();
        let mut hidden = create(1, "NYSE", "GE");
        hidden.display = 2;
        f.service.create_product(hidden).await.unwrap();

        let query = ProductQuery {
            product_types: vec![1],
            exchange_codes: vec!["NYSE".to_string()],
            display: Some(1),
            ..Default::default()
        };
        let page = f.service.get_products(&query).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].code, "IBM");
        assert_eq!(page.info.total_count, 1);

        let everything = f.service.get_products(&ProductQuery::default()).await.unwrap();
        assert_eq!(everything.items.len(), 3);
    }

    #[tokio::test]
    async fn get_products_explicit_zero_flag_is_unset() {
        let f = fixture();
        f.service.create_product(create(1, "NYSE", "IBM")).await.unwrap();
        let query = ProductQuery {
            status: Some(0),
            ..Default::default()
        };
        assert_eq!(f.service.get_products(&query).await.unwrap().items.len(), 1);

        let query = ProductQuery {
            status: Some(7),
            ..Default::default()
        };
        assert!(f.service.get_products(&query).await.unwrap_err().is_validation());
    }

    #[tokio::test]
    async fn get_products_rejects_unknown_product_type() {
        let f = fixture();
        f.service.create_product(create(1, "NYSE", "IBM")).await.unwrap();
        let query = ProductQuery {
            product_types: vec![1, 9],
            ..Default::default()
        };
        let err = f.service.get_products(&query).await.unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("product_type"));

        let query = ProductQuery {
            product_types: vec![0, 1],
            ..Default::default()
        };
        assert_eq!(f.service.get_products(&query).await.unwrap().items.len(), 1);
    }

    #[tokio::test]
    async fn get_products_empty_result_is_empty_list() {
        let f = fixture();
        let query = ProductQuery {
            exchange_codes: vec!["LSE".to_string()],
            ..Default::default()
        };
        let page = f.service.get_products(&query).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.info.total_count, 0);
    }

    #[tokio::test]
    async fn get_exchange_absent_and_present() {
        let f = fixture();
        assert!(
            f.service
                .get_exchange(&ExchangeQuery::by_code("NYSE"))
                .await
                .unwrap()
                .is_none()
        );

        f.exchanges
            .create(&NewExchange::new("NYSE", "New York Stock Exchange"))
            .await
            .unwrap();
        let found = f
            .service
            .get_exchange(&ExchangeQuery::by_code("NYSE"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.name, "New York Stock Exchange");

        let disabled = ExchangeQuery {
            status: Some(2),
            ..ExchangeQuery::by_code("NYSE")
        };
        assert!(f.service.get_exchange(&disabled).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn get_exchanges_reports_offset_and_returns_leading_rows() {
        let f = fixture();
        for n in 0..25 {
            f.exchanges
                .create(&NewExchange::new(format!("EX{n}"), format!("Exchange {n}")))
                .await
                .unwrap();
        }
        let page = f.service.get_exchanges(Pagination::new(2, 10)).await.unwrap();
        assert_eq!(page.info.total_count, 25);
        assert_eq!(page.info.offset, 10);
        assert_eq!(page.items.len(), 10);
        assert_eq!(page.items[0].code, "EX0");
    }

    #[test]
    fn modify_and_delete_are_not_implemented() {
        let f = fixture();
        for id in [0, 1, -5] {
            assert!(f.service.modify_product(id).unwrap_err().is_not_implemented());
            assert!(f.service.delete_product(id).unwrap_err().is_not_implemented());
        }
    }

    #[tokio::test]
    async fn repeated_queries_are_identical() {
        let f = fixture();
        f.service.create_product(create(1, "NYSE", "IBM")).await.unwrap();
        f.service.create_product(create(3, "FX", "EURUSD")).await.unwrap();
        let query = ProductQuery::default();
        assert_eq!(
            f.service.get_products(&query).await.unwrap(),
            f.service.get_products(&query).await.unwrap()
        );
    }
}
