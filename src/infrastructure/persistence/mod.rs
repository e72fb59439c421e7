//! # Persistence Layer
//!
//! Record access for the catalog tables.
//!
//! ## Ports
//!
//! - [`Repository`]: Generic create and read operations over one [`Record`]
//! - [`Filter`]: Optional-field predicates lowered to [`Condition`]s
//!
//! ## Implementations
//!
//! - `postgres`: PostgreSQL implementation over a `sqlx` pool
//! - `in_memory`: In-memory implementation for testing

pub mod in_memory;
pub mod postgres;
pub mod query;
pub mod records;
pub mod traits;

pub use in_memory::InMemoryRepository;
pub use postgres::PgRepository;
pub use query::{Condition, Filter, FilterValue};
pub use records::{ExchangeFilter, ExchangeHolidayFilter, GroupPermissionPathFilter, ProductFilter};
pub use traits::{Record, Repository, RepositoryError, RepositoryResult};
