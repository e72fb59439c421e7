//! # Domain Entities
//!
//! Catalog records owned by the relational store.
//!
//! - [`Exchange`]: Trading venue, keyed by its code
//! - [`Product`]: Instrument listed on an exchange
//! - [`GroupPermissionPath`]: Access rule for a permission group
//! - [`ExchangeHoliday`]: Calendar override of an exchange
//!
//! Each entity has a `New*` counterpart carrying the fields supplied on
//! creation.

pub mod exchange;
pub mod exchange_holiday;
pub mod group_permission_path;
pub mod product;

pub use exchange::{Exchange, NewExchange};
pub use exchange_holiday::{ExchangeHoliday, NewExchangeHoliday};
pub use group_permission_path::{GroupPermissionPath, NewGroupPermissionPath};
pub use product::{NewProduct, Product};
