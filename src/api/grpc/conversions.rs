//! # Protobuf Conversions
//!
//! Mapping between domain types and the generated protobuf messages.
//!
//! Timestamps travel as Unix seconds. Decimals travel as `double`.
//! Pagination counters are `int32` on the wire and saturate on overflow.

use crate::api::grpc::proto;
use crate::application::dto::{CreateProduct, ExchangeQuery, ProductLookup, ProductQuery};
use crate::domain::entities::{Exchange, Product};
use crate::domain::value_objects::{
    ExceptionTime, ExchangeDay, Pagination, PaginationInfo, TimeWindow,
};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use thiserror::Error;

/// Error raised when a request message cannot be mapped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// A required field or oneof was not set.
    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

impl From<ConversionError> for tonic::Status {
    fn from(err: ConversionError) -> Self {
        tonic::Status::invalid_argument(err.to_string())
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

impl From<proto::Pagination> for Pagination {
    fn from(p: proto::Pagination) -> Self {
        Pagination::new(p.page, p.page_size)
    }
}

impl From<PaginationInfo> for proto::PaginationInfo {
    fn from(info: PaginationInfo) -> Self {
        Self {
            page: info.page,
            page_size: info.page_size,
            total_count: saturate(info.total_count),
            offset: saturate(info.offset),
        }
    }
}

impl From<ExchangeDay> for proto::ExchangeDay {
    fn from(day: ExchangeDay) -> Self {
        Self {
            start_day: day.start_day,
            end_day: day.end_day,
        }
    }
}

impl From<TimeWindow> for proto::TimeWindow {
    fn from(window: TimeWindow) -> Self {
        Self {
            start: window.start.timestamp(),
            end: window.end.timestamp(),
        }
    }
}

impl From<ExceptionTime> for proto::ExceptionTime {
    fn from(exception: ExceptionTime) -> Self {
        Self {
            trade: exception.trade.into_iter().map(Into::into).collect(),
            stop_trade: exception.stop_trade.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<Exchange> for proto::Exchange {
    fn from(exchange: Exchange) -> Self {
        Self {
            code: exchange.code,
            product_type: exchange.product_type.as_i32(),
            name: exchange.name,
            status: exchange.status.as_i32(),
            display: exchange.display.as_i32(),
            country_code: exchange.country_code,
            timezone_offset: f64::from(exchange.timezone_offset),
            open_time: exchange.open_time.map(|t| t.timestamp()),
            close_time: exchange.close_time.map(|t| t.timestamp()),
            exchange_day: Some(exchange.exchange_day.into()),
            exception_time: Some(exchange.exception_time.into()),
            daylight_saving: exchange.daylight_saving,
            location: exchange.location,
            created_at: exchange.created_at.timestamp(),
            updated_at: exchange.updated_at.timestamp(),
        }
    }
}

impl From<Product> for proto::Product {
    fn from(product: Product) -> Self {
        Self {
            id: i64::try_from(product.id).unwrap_or(i64::MAX),
            r#type: product.product_type.as_i32(),
            exchange_code: product.exchange_code,
            code: product.code,
            name: product.name,
            status: product.status.as_i32(),
            display: product.display.as_i32(),
            currency_code: product.currency_code,
            tick_unit: decimal_to_f64(product.tick_unit),
            minimum_order: product.minimum_order.map(decimal_to_f64),
            icon_id: product.icon_id,
            created_at: product.created_at.timestamp(),
            updated_at: product.updated_at.timestamp(),
        }
    }
}

impl From<proto::GetExchangeReq> for ExchangeQuery {
    fn from(req: proto::GetExchangeReq) -> Self {
        Self {
            code: req.code,
            status: req.status,
            display: req.display,
        }
    }
}

impl From<proto::CreateProductReq> for CreateProduct {
    fn from(req: proto::CreateProductReq) -> Self {
        Self {
            product_type: req.r#type,
            exchange_code: req.exchange_code,
            code: req.code,
            name: req.name,
            status: req.status,
            display: req.display,
            currency_code: req.currency_code,
            tick_unit: req.tick_unit,
            minimum_order: req.minimum_order,
            icon_id: req.icon_id,
        }
    }
}

impl TryFrom<proto::GetProductReq> for ProductLookup {
    type Error = ConversionError;

    fn try_from(req: proto::GetProductReq) -> Result<Self, Self::Error> {
        match req.product {
            Some(proto::get_product_req::Product::Id(id)) => Ok(Self::Id(id)),
            Some(proto::get_product_req::Product::Code(code)) => Ok(Self::Code {
                exchange_code: code.exchange_code,
                code: code.code,
            }),
            None => Err(ConversionError::MissingField("product")),
        }
    }
}

impl From<proto::GetProductsReq> for ProductQuery {
    fn from(req: proto::GetProductsReq) -> Self {
        Self {
            product_types: req.product_type,
            exchange_codes: req.exchange_code,
            status: req.status,
            display: req.display,
            pagination: req.pagination.map(Into::into).unwrap_or_default(),
        }
    }
}
