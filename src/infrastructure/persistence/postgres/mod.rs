//! # PostgreSQL Persistence
//!
//! sqlx-backed implementations of the repository port.
//!
//! - [`PgRepository`]: Generic repository over any [`PgRecord`]
//! - [`rows`]: Row mappings for the catalog tables
//! - [`MIGRATOR`]: Embedded schema migrations

pub mod repository;
pub mod rows;

pub use repository::PgRepository;
pub use rows::PgRecord;

use sqlx::migrate::Migrator;

/// Schema migrations embedded from `migrations/`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
