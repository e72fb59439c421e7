//! # Application Layer
//!
//! Use cases exposed to the transport layer.
//!
//! - [`dto`]: Request shapes
//! - [`error`]: Application errors
//! - [`services`]: Catalog use cases

pub mod dto;
pub mod error;
pub mod services;

pub use error::{CatalogError, CatalogResult};
pub use services::CatalogService;
