//! # Product Catalog
//!
//! System-of-record service for tradeable products and the exchanges they
//! trade on, served over gRPC and backed by PostgreSQL.
//!
//! # Architecture
//!
//! - [`domain`]: Entities and value objects
//! - [`application`]: Catalog use cases, validation and defaults
//! - [`infrastructure`]: Record access and the push notification client
//! - [`api`]: gRPC service and HTTP health probes
//! - [`config`]: Environment-driven settings
//! - [`telemetry`]: Logging set-up

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod telemetry;
