//! # Protobuf Definitions
//!
//! Types and service stubs generated from `proto/catalog/v1/product.proto`.

#![allow(missing_docs)]
#![allow(clippy::all, clippy::pedantic)]

/// Package `catalog.v1`.
pub mod catalog_v1 {
    tonic::include_proto!("catalog.v1");
}

pub use catalog_v1::*;
