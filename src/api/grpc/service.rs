//! # gRPC Service Implementation
//!
//! Implementation of `catalog.v1.ProductService` over [`CatalogService`].
//!
//! Every handler maps the request into a catalog request, calls the
//! service, and maps the result back. Absent records produce a response
//! with the entity field unset. Errors map to statuses as follows:
//!
//! | Error | Status |
//! |-------|--------|
//! | `CatalogError::Validation` | `INVALID_ARGUMENT` |
//! | `CatalogError::Persistence` | `INTERNAL` |
//! | `CatalogError::NotImplemented` | `UNIMPLEMENTED` |

use crate::api::grpc::proto;
use crate::api::grpc::proto::product_service_server::{ProductService, ProductServiceServer};
use crate::application::dto::{ExchangeQuery, ProductLookup, ProductQuery};
use crate::application::error::CatalogError;
use crate::application::services::CatalogService;
use crate::domain::value_objects::Pagination;
use tonic::{Request, Response, Status};

impl From<CatalogError> for Status {
    fn from(err: CatalogError) -> Self {
        match &err {
            CatalogError::Validation(_) => Status::invalid_argument(err.to_string()),
            CatalogError::Persistence(source) => {
                tracing::error!(error = %source, "persistence failure");
                Status::internal(err.to_string())
            }
            CatalogError::NotImplemented(_) => Status::unimplemented(err.to_string()),
        }
    }
}

/// gRPC front end of the catalog.
#[derive(Debug, Clone)]
pub struct ProductServiceImpl {
    catalog: CatalogService,
}

impl ProductServiceImpl {
    /// Creates the service over a catalog.
    #[must_use]
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// Wraps the service into the tonic server type.
    #[must_use]
    pub fn into_server(self) -> ProductServiceServer<Self> {
        ProductServiceServer::new(self)
    }
}

#[tonic::async_trait]
impl ProductService for ProductServiceImpl {
    async fn get_exchange(
        &self,
        request: Request<proto::GetExchangeReq>,
    ) -> Result<Response<proto::GetExchangeRes>, Status> {
        let query: ExchangeQuery = request.into_inner().into();
        let exchange = self.catalog.get_exchange(&query).await?;
        Ok(Response::new(proto::GetExchangeRes {
            exchange: exchange.map(Into::into),
        }))
    }

    async fn get_exchanges(
        &self,
        request: Request<proto::GetExchangesReq>,
    ) -> Result<Response<proto::GetExchangesRes>, Status> {
        let pagination: Pagination = request
            .into_inner()
            .pagination
            .map(Into::into)
            .unwrap_or_default();
        let page = self.catalog.get_exchanges(pagination).await?;
        Ok(Response::new(proto::GetExchangesRes {
            exchange: page.items.into_iter().map(Into::into).collect(),
            pagination_info: Some(page.info.into()),
        }))
    }

    async fn create_product(
        &self,
        request: Request<proto::CreateProductReq>,
    ) -> Result<Response<proto::CreateProductRes>, Status> {
        self.catalog.create_product(request.into_inner().into()).await?;
        Ok(Response::new(proto::CreateProductRes {}))
    }

    async fn get_product(
        &self,
        request: Request<proto::GetProductReq>,
    ) -> Result<Response<proto::GetProductRes>, Status> {
        let lookup = ProductLookup::try_from(request.into_inner())?;
        let product = self.catalog.get_product(&lookup).await?;
        Ok(Response::new(proto::GetProductRes {
            product: product.map(Into::into),
        }))
    }

    async fn get_products(
        &self,
        request: Request<proto::GetProductsReq>,
    ) -> Result<Response<proto::GetProductsRes>, Status> {
        let query: ProductQuery = request.into_inner().into();
        let page = self.catalog.get_products(&query).await?;
        Ok(Response::new(proto::GetProductsRes {
            product: page.items.into_iter().map(Into::into).collect(),
            pagination_info: Some(page.info.into()),
        }))
    }

    async fn modify_product(
        &self,
        request: Request<proto::ModifyProductReq>,
    ) -> Result<Response<proto::ModifyProductRes>, Status> {
        self.catalog.modify_product(request.into_inner().id)?;
        Ok(Response::new(proto::ModifyProductRes {}))
    }

    async fn delete_product(
        &self,
        request: Request<proto::DeleteProductReq>,
    ) -> Result<Response<proto::DeleteProductRes>, Status> {
        self.catalog.delete_product(request.into_inner().id)?;
        Ok(Response::new(proto::DeleteProductRes {}))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::domain::entities::{Exchange, NewExchange, Product};
    use crate::infrastructure::persistence::{InMemoryRepository, Repository, RepositoryError};
    use std::sync::Arc;
    use tonic::Code;

    fn service() -> (ProductServiceImpl, InMemoryRepository<Exchange>) {
        let exchanges = InMemoryRepository::new();
        let products = InMemoryRepository::<Product>::new();
        let catalog = CatalogService::new(Arc::new(exchanges.clone()), Arc::new(products));
        (ProductServiceImpl::new(catalog), exchanges)
    }

    fn create_req(product_type: i32, exchange_code: &str, code: &str) -> proto::CreateProductReq {
        proto::CreateProductReq {
            r#type: product_type,
            exchange_code: exchange_code.to_string(),
            code: code.to_string(),
            name: code.to_string(),
            currency_code: "USD".to_string(),
            tick_unit: 0.01,
            ..Default::default()
        }
    }

    fn get_by_code(exchange_code: &str, code: &str) -> proto::GetProductReq {
        proto::GetProductReq {
            product: Some(proto::get_product_req::Product::Code(proto::ProductCode {
                exchange_code: exchange_code.to_string(),
                code: code.to_string(),
            })),
        }
    }

    #[test]
    fn catalog_errors_map_to_status_codes() {
        let status: Status = CatalogError::validation("bad").into();
        assert_eq!(status.code(), Code::InvalidArgument);

        let status: Status = CatalogError::from(RepositoryError::connection("down")).into();
        assert_eq!(status.code(), Code::Internal);

        let status: Status = CatalogError::not_implemented("DeleteProduct").into();
        assert_eq!(status.code(), Code::Unimplemented);
    }

    #[tokio::test]
    async fn create_product_invalid_type_is_invalid_argument() {
        let (svc, _) = service();
        let status = svc
            .create_product(Request::new(create_req(0, "NYSE", "AAPL")))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn created_product_is_listed_with_defaults() {
        let (svc, _) = service();
        svc.create_product(Request::new(create_req(2, "NYSE", "AAPL")))
            .await
            .unwrap();

        let res = svc
            .get_products(Request::new(proto::GetProductsReq::default()))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.product.len(), 1);
        let product = &res.product[0];
        assert_eq!(product.r#type, proto::ProductType::Crypto as i32);
        assert_eq!(product.status, proto::Status::Enabled as i32);
        assert_eq!(product.display, proto::Display::Enabled as i32);
        assert_eq!(
            res.pagination_info,
            Some(proto::PaginationInfo {
                page: 0,
                page_size: 0,
                total_count: 1,
                offset: 0,
            })
        );
    }

    #[tokio::test]
    async fn get_product_by_code_uses_exchange_code_for_both_fields() {
        let (svc, _) = service();
        svc.create_product(Request::new(create_req(1, "NASDAQ", "MSFT")))
            .await
            .unwrap();

        let res = svc
            .get_product(Request::new(get_by_code("NASDAQ", "MSFT")))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.product, None);
    }

    #[tokio::test]
    async fn get_product_by_id_round_trip() {
        let (svc, _) = service();
        svc.create_product(Request::new(create_req(1, "NYSE", "IBM")))
            .await
            .unwrap();
        let res = svc
            .get_product(Request::new(proto::GetProductReq {
                product: Some(proto::get_product_req::Product::Id(1)),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.product.unwrap().code, "IBM");
    }

    #[tokio::test]
    async fn get_product_without_selector_is_invalid_argument() {
        let (svc, _) = service();
        let status = svc
            .get_product(Request::new(proto::GetProductReq { product: None }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn get_exchange_absent_is_empty_response() {
        let (svc, exchanges) = service();
        let res = svc
            .get_exchange(Request::new(proto::GetExchangeReq {
                code: "LSE".to_string(),
                ..Default::default()
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.exchange, None);

        exchanges
            .create(&NewExchange::new("LSE", "London Stock Exchange"))
            .await
            .unwrap();
        let res = svc
            .get_exchange(Request::new(proto::GetExchangeReq {
                code: "LSE".to_string(),
                status: Some(proto::Status::Enabled as i32),
                display: None,
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.exchange.unwrap().name, "London Stock Exchange");
    }

    #[tokio::test]
    async fn get_exchanges_paginates() {
        let (svc, exchanges) = service();
        for n in 0..25 {
            exchanges
                .create(&NewExchange::new(format!("EX{n}"), "Exchange"))
                .await
                .unwrap();
        }
        let res = svc
            .get_exchanges(Request::new(proto::GetExchangesReq {
                pagination: Some(proto::Pagination {
                    page: 2,
                    page_size: 10,
                }),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(res.exchange.len(), 10);
        assert_eq!(res.exchange[0].code, "EX0");
        let info = res.pagination_info.unwrap();
        assert_eq!(info.total_count, 25);
        assert_eq!(info.offset, 10);
    }

    #[tokio::test]
    async fn modify_and_delete_are_unimplemented() {
        let (svc, _) = service();
        let status = svc
            .modify_product(Request::new(proto::ModifyProductReq {
                id: 1,
                ..Default::default()
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unimplemented);

        let status = svc
            .delete_product(Request::new(proto::DeleteProductReq { id: 1 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::Unimplemented);
    }
}
