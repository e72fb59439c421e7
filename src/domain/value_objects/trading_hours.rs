//! # Trading Hours
//!
//! Structured trading-day range and exception windows of an exchange.
//!
//! Both documents are stored as JSON with camelCase keys.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive weekday range an exchange trades on.
///
/// Days are numbered from Sunday (`0`) to Saturday (`6`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeDay {
    /// First trading day of the week.
    pub start_day: i32,
    /// Last trading day of the week, inclusive.
    pub end_day: i32,
}

impl Default for ExchangeDay {
    fn default() -> Self {
        Self {
            start_day: 1,
            end_day: 5,
        }
    }
}

/// A single override interval.
///
/// Only month, day and time of day are meaningful; the year is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Interval start.
    pub start: DateTime<Utc>,
    /// Interval end.
    pub end: DateTime<Utc>,
}

/// Trade / no-trade overrides of the regular session.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionTime {
    /// Windows during which trading is open outside regular hours.
    #[serde(default)]
    pub trade: Vec<TimeWindow>,
    /// Windows during which trading is halted inside regular hours.
    #[serde(default)]
    pub stop_trade: Vec<TimeWindow>,
}
