//! # Exchange Entity
//!
//! A trading venue and its session attributes.
//!
//! The exchange code is the natural key: it is unique and never changes
//! once the exchange is created.

use crate::domain::value_objects::{ExceptionTime, ExchangeDay, ProductType, Toggle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    /// Unique exchange code.
    pub code: String,
    /// Kind of products listed on the exchange.
    pub product_type: ProductType,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: Toggle,
    /// Display flag.
    pub display: Toggle,
    /// ISO country code.
    pub country_code: String,
    /// Offset from UTC in hours.
    pub timezone_offset: f32,
    /// Regular session open time, if set.
    pub open_time: Option<DateTime<Utc>>,
    /// Regular session close time, if set.
    pub close_time: Option<DateTime<Utc>>,
    /// Trading weekday range.
    pub exchange_day: ExchangeDay,
    /// Session overrides.
    pub exception_time: ExceptionTime,
    /// Whether the exchange follows daylight saving time.
    pub daylight_saving: bool,
    /// Free-text location.
    pub location: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when an exchange is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewExchange {
    /// Unique exchange code.
    pub code: String,
    /// Kind of products listed on the exchange.
    pub product_type: ProductType,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: Toggle,
    /// Display flag.
    pub display: Toggle,
    /// ISO country code.
    pub country_code: String,
    /// Offset from UTC in hours.
    pub timezone_offset: f32,
    /// Regular session open time.
    pub open_time: Option<DateTime<Utc>>,
    /// Regular session close time.
    pub close_time: Option<DateTime<Utc>>,
    /// Trading weekday range.
    pub exchange_day: ExchangeDay,
    /// Session overrides.
    pub exception_time: ExceptionTime,
    /// Whether the exchange follows daylight saving time.
    pub daylight_saving: bool,
    /// Free-text location.
    pub location: String,
}

impl NewExchange {
    /// Creates an enabled, displayed exchange with the given code and name.
    #[must_use]
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the product type.
    #[must_use]
    pub fn with_product_type(mut self, product_type: ProductType) -> Self {
        self.product_type = product_type;
        self
    }

    /// Sets the lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: Toggle) -> Self {
        self.status = status;
        self
    }

    /// Sets the display flag.
    #[must_use]
    pub fn with_display(mut self, display: Toggle) -> Self {
        self.display = display;
        self
    }

    /// Sets the regular session hours.
    #[must_use]
    pub fn with_session(mut self, open: DateTime<Utc>, close: DateTime<Utc>) -> Self {
        self.open_time = Some(open);
        self.close_time = Some(close);
        self
    }

    /// Materializes the stored exchange with both timestamps set to `now`.
    #[must_use]
    pub fn into_exchange(self, now: DateTime<Utc>) -> Exchange {
        Exchange {
            code: self.code,
            product_type: self.product_type,
            name: self.name,
            status: self.status,
            display: self.display,
            country_code: self.country_code,
            timezone_offset: self.timezone_offset,
            open_time: self.open_time,
            close_time: self.close_time,
            exchange_day: self.exchange_day,
            exception_time: self.exception_time,
            daylight_saving: self.daylight_saving,
            location: self.location,
            created_at: now,
            updated_at: now,
        }
    }
}
