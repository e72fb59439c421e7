//! # API Layer
//!
//! External interfaces of the service.
//!
//! - [`grpc`]: Catalog operations over gRPC
//! - [`rest`]: Health probes over HTTP

pub mod grpc;
pub mod rest;
