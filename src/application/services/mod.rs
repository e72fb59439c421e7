//! # Application Services
//!
//! Services that orchestrate validation and persistence.
//!
//! - [`CatalogService`]: Exchange and product use cases

pub mod catalog;

pub use catalog::CatalogService;
