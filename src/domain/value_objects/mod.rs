//! # Value Objects
//!
//! Immutable types with domain semantics.
//!
//! ## Domain Enums
//!
//! - [`ProductType`]: Instrument classification
//! - [`Toggle`]: Status and display flags
//! - [`HolidayKind`]: Holiday classification
//!
//! ## Pagination
//!
//! - [`Pagination`], [`PageWindow`], [`PaginationInfo`], [`Page`]
//!
//! ## Trading Hours
//!
//! - [`ExchangeDay`], [`ExceptionTime`], [`TimeWindow`]

pub mod enums;
pub mod pagination;
pub mod trading_hours;

pub use enums::{HolidayKind, ParseEnumError, ProductType, Toggle};
pub use pagination::{Page, PageWindow, Pagination, PaginationInfo};
pub use trading_hours::{ExceptionTime, ExchangeDay, TimeWindow};
