//! # Exchange Holiday
//!
//! A calendar override for one exchange.

use crate::domain::value_objects::HolidayKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeHoliday {
    /// Store-assigned identifier.
    pub id: u64,
    /// Holiday name.
    pub name: String,
    /// First day of the holiday.
    pub date: DateTime<Utc>,
    /// Last day for multi-day holidays.
    pub end_date: Option<DateTime<Utc>>,
    /// Full or half day.
    pub kind: HolidayKind,
    /// Code of the affected exchange.
    pub exchange_code: String,
    /// Early close time of a half day.
    pub half_day_close_time: Option<DateTime<Utc>>,
    /// Free-text memo.
    pub memo: String,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when a holiday is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewExchangeHoliday {
    /// Holiday name.
    pub name: String,
    /// First day of the holiday.
    pub date: DateTime<Utc>,
    /// Last day for multi-day holidays.
    pub end_date: Option<DateTime<Utc>>,
    /// Full or half day.
    pub kind: HolidayKind,
    /// Code of the affected exchange.
    pub exchange_code: String,
    /// Early close time of a half day.
    pub half_day_close_time: Option<DateTime<Utc>>,
    /// Free-text memo.
    pub memo: String,
}

impl NewExchangeHoliday {
    /// Creates a full-day holiday.
    #[must_use]
    pub fn full_day(
        exchange_code: impl Into<String>,
        name: impl Into<String>,
        date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            end_date: None,
            kind: HolidayKind::FullDay,
            exchange_code: exchange_code.into(),
            half_day_close_time: None,
            memo: String::new(),
        }
    }

    /// Materializes the stored holiday with the assigned id.
    #[must_use]
    pub fn into_holiday(self, id: u64, now: DateTime<Utc>) -> ExchangeHoliday {
        ExchangeHoliday {
            id,
            name: self.name,
            date: self.date,
            end_date: self.end_date,
            kind: self.kind,
            exchange_code: self.exchange_code,
            half_day_close_time: self.half_day_close_time,
            memo: self.memo,
            updated_at: now,
        }
    }
}
