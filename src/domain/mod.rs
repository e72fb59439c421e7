//! # Domain Layer
//!
//! Catalog entities and value objects, free of persistence and transport
//! concerns.

pub mod entities;
pub mod value_objects;
