//! # REST API
//!
//! HTTP endpoints using axum for operational probes.
//!
//! # Endpoints
//!
//! ## Health
//! - `GET /health/liveness` - Process liveness
//! - `GET /health/readiness` - Readiness to serve traffic
//!
//! # Usage
//!
//! ```ignore
//! use product_catalog::api::rest::{health_router, HealthState};
//!
//! let health = HealthState::new();
//! let router = health_router(health.clone());
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod health;

pub use health::{HealthResponse, HealthState, health_router};
