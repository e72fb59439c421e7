//! # gRPC Services
//!
//! gRPC service implementations using tonic.
//!
//! # Modules
//!
//! - [`proto`]: Generated protobuf types and gRPC service definitions
//! - [`conversions`]: Conversions between domain types and protobuf messages
//! - [`service`]: gRPC service implementation
//! - [`panic_guard`]: Layer mapping handler panics to `INTERNAL`
//!
//! # Usage
//!
//! ```ignore
//! use product_catalog::api::grpc::ProductServiceImpl;
//! use tonic::transport::Server;
//!
//! let service = ProductServiceImpl::new(catalog_service);
//! Server::builder()
//!     .add_service(service.into_server())
//!     .serve("0.0.0.0:50051".parse()?)
//!     .await?;
//! ```

pub mod conversions;
pub mod panic_guard;
pub mod proto;
pub mod service;

pub use conversions::ConversionError;
pub use panic_guard::panic_guard;
pub use proto::catalog_v1;
pub use service::ProductServiceImpl;
