//! # Row Mappings
//!
//! Column lists, row types and insert statements for each catalog table.

use crate::domain::entities::{
    Exchange, ExchangeHoliday, GroupPermissionPath, NewExchange, NewExchangeHoliday,
    NewGroupPermissionPath, NewProduct, Product,
};
use crate::domain::value_objects::{
    ExceptionTime, ExchangeDay, HolidayKind, ParseEnumError, ProductType, Toggle,
};
use crate::infrastructure::persistence::traits::{Record, RepositoryError, RepositoryResult};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Postgres, QueryBuilder, Row};

/// A record stored in PostgreSQL.
pub trait PgRecord: Record {
    /// Raw row shape decoded by sqlx.
    type Row: for<'r> FromRow<'r, PgRow> + Send + Unpin;

    /// Comma-separated column list selected for this record.
    const COLUMNS: &'static str;

    /// Column returned by the insert statement.
    const KEY_COLUMN: &'static str;

    /// Converts a decoded row into the record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` when a stored value is
    /// outside its domain.
    fn from_row(row: Self::Row) -> RepositoryResult<Self>;

    /// Appends `(columns) VALUES (...)` for the insertion shape.
    fn push_insert(new: &Self::New, builder: &mut QueryBuilder<'_, Postgres>);

    /// Reads the key from the row returned by the insert.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Serialization` when the key cannot be read.
    fn key_from_row(row: &PgRow) -> RepositoryResult<Self::Key>;
}

fn decode(err: ParseEnumError) -> RepositoryError {
    RepositoryError::serialization(err.to_string())
}

fn read_id(row: &PgRow, column: &str) -> RepositoryResult<u64> {
    let id: i64 = row
        .try_get(column)
        .map_err(|e| RepositoryError::serialization(e.to_string()))?;
    u64::try_from(id).map_err(|e| RepositoryError::serialization(e.to_string()))
}

fn to_id(id: i64) -> RepositoryResult<u64> {
    u64::try_from(id).map_err(|e| RepositoryError::serialization(e.to_string()))
}

fn bind_id(id: u64) -> i64 {
    i64::try_from(id).unwrap_or(i64::MAX)
}

/// Row type for `exchange` queries.
#[derive(Debug, FromRow)]
pub struct ExchangeRow {
    code: String,
    product_type: i32,
    name: String,
    status: i32,
    display: i32,
    country_code: String,
    timezone_offset: f32,
    open_time: Option<DateTime<Utc>>,
    close_time: Option<DateTime<Utc>>,
    exchange_day: Json<ExchangeDay>,
    exception_time: Json<ExceptionTime>,
    daylight_saving: bool,
    location: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgRecord for Exchange {
    type Row = ExchangeRow;

    const COLUMNS: &'static str = "code, product_type, name, status, display, country_code, \
        timezone_offset, open_time, close_time, exchange_day, exception_time, daylight_saving, \
        location, created_at, updated_at";
    const KEY_COLUMN: &'static str = "code";

    fn from_row(row: ExchangeRow) -> RepositoryResult<Self> {
        Ok(Exchange {
            code: row.code,
            product_type: ProductType::try_from(row.product_type).map_err(decode)?,
            name: row.name,
            status: Toggle::try_from(row.status).map_err(decode)?,
            display: Toggle::try_from(row.display).map_err(decode)?,
            country_code: row.country_code,
            timezone_offset: row.timezone_offset,
            open_time: row.open_time,
            close_time: row.close_time,
            exchange_day: row.exchange_day.0,
            exception_time: row.exception_time.0,
            daylight_saving: row.daylight_saving,
            location: row.location,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn push_insert(new: &NewExchange, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(code, product_type, name, status, display, country_code, timezone_offset, \
             open_time, close_time, exchange_day, exception_time, daylight_saving, location) ",
        );
        builder.push_values(std::iter::once(new.clone()), |mut b, new| {
            b.push_bind(new.code)
                .push_bind(new.product_type.as_i32())
                .push_bind(new.name)
                .push_bind(new.status.as_i32())
                .push_bind(new.display.as_i32())
                .push_bind(new.country_code)
                .push_bind(new.timezone_offset)
                .push_bind(new.open_time)
                .push_bind(new.close_time)
                .push_bind(Json(new.exchange_day))
                .push_bind(Json(new.exception_time))
                .push_bind(new.daylight_saving)
                .push_bind(new.location);
        });
    }

    fn key_from_row(row: &PgRow) -> RepositoryResult<String> {
        row.try_get(Self::KEY_COLUMN)
            .map_err(|e| RepositoryError::serialization(e.to_string()))
    }
}

/// Row type for `product` queries.
#[derive(Debug, FromRow)]
pub struct ProductRow {
    id: i64,
    #[sqlx(rename = "type")]
    product_type: i32,
    exchange_code: String,
    code: String,
    name: String,
    status: i32,
    display: i32,
    currency_code: String,
    tick_unit: Decimal,
    minimum_order: Option<Decimal>,
    icon_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PgRecord for Product {
    type Row = ProductRow;

    const COLUMNS: &'static str = "id, type, exchange_code, code, name, status, display, \
        currency_code, tick_unit, minimum_order, icon_id, created_at, updated_at";
    const KEY_COLUMN: &'static str = "id";

    fn from_row(row: ProductRow) -> RepositoryResult<Self> {
        Ok(Product {
            id: to_id(row.id)?,
            product_type: ProductType::try_from(row.product_type).map_err(decode)?,
            exchange_code: row.exchange_code,
            code: row.code,
            name: row.name,
            status: Toggle::try_from(row.status).map_err(decode)?,
            display: Toggle::try_from(row.display).map_err(decode)?,
            currency_code: row.currency_code,
            tick_unit: row.tick_unit,
            minimum_order: row.minimum_order,
            icon_id: row.icon_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn push_insert(new: &NewProduct, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push(
            "(type, exchange_code, code, name, status, display, currency_code, tick_unit, \
             minimum_order, icon_id) ",
        );
        builder.push_values(std::iter::once(new.clone()), |mut b, new| {
            b.push_bind(new.product_type.as_i32())
                .push_bind(new.exchange_code)
                .push_bind(new.code)
                .push_bind(new.name)
                .push_bind(new.status.as_i32())
                .push_bind(new.display.as_i32())
                .push_bind(new.currency_code)
                .push_bind(new.tick_unit)
                .push_bind(new.minimum_order)
                .push_bind(new.icon_id);
        });
    }

    fn key_from_row(row: &PgRow) -> RepositoryResult<u64> {
        read_id(row, Self::KEY_COLUMN)
    }
}

/// Row type for `group_permission_path` queries.
#[derive(Debug, FromRow)]
pub struct GroupPermissionPathRow {
    id: i64,
    group_id: i64,
    method: String,
    path: String,
}

impl PgRecord for GroupPermissionPath {
    type Row = GroupPermissionPathRow;

    const COLUMNS: &'static str = "id, group_id, method, path";
    const KEY_COLUMN: &'static str = "id";

    fn from_row(row: GroupPermissionPathRow) -> RepositoryResult<Self> {
        Ok(GroupPermissionPath {
            id: to_id(row.id)?,
            group_id: to_id(row.group_id)?,
            method: row.method,
            path: row.path,
        })
    }

    fn push_insert(new: &NewGroupPermissionPath, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("(group_id, method, path) ");
        builder.push_values(std::iter::once(new.clone()), |mut b, new| {
            b.push_bind(bind_id(new.group_id))
                .push_bind(new.method)
                .push_bind(new.path);
        });
    }

    fn key_from_row(row: &PgRow) -> RepositoryResult<u64> {
        read_id(row, Self::KEY_COLUMN)
    }
}

/// Row type for `exchange_holiday` queries.
#[derive(Debug, FromRow)]
pub struct ExchangeHolidayRow {
    id: i64,
    name: String,
    date: DateTime<Utc>,
    end_date: Option<DateTime<Utc>>,
    #[sqlx(rename = "type")]
    kind: i32,
    exchange_code: String,
    half_day_close_time: Option<DateTime<Utc>>,
    memo: String,
    updated_at: DateTime<Utc>,
}

impl PgRecord for ExchangeHoliday {
    type Row = ExchangeHolidayRow;

    const COLUMNS: &'static str =
        "id, name, date, end_date, type, exchange_code, half_day_close_time, memo, updated_at";
    const KEY_COLUMN: &'static str = "id";

    fn from_row(row: ExchangeHolidayRow) -> RepositoryResult<Self> {
        Ok(ExchangeHoliday {
            id: to_id(row.id)?,
            name: row.name,
            date: row.date,
            end_date: row.end_date,
            kind: HolidayKind::try_from(row.kind).map_err(decode)?,
            exchange_code: row.exchange_code,
            half_day_close_time: row.half_day_close_time,
            memo: row.memo,
            updated_at: row.updated_at,
        })
    }

    fn push_insert(new: &NewExchangeHoliday, builder: &mut QueryBuilder<'_, Postgres>) {
        builder.push("(name, date, end_date, type, exchange_code, half_day_close_time, memo) ");
        builder.push_values(std::iter::once(new.clone()), |mut b, new| {
            b.push_bind(new.name)
                .push_bind(new.date)
                .push_bind(new.end_date)
                .push_bind(new.kind.as_i32())
                .push_bind(new.exchange_code)
                .push_bind(new.half_day_close_time)
                .push_bind(new.memo);
        });
    }

    fn key_from_row(row: &PgRow) -> RepositoryResult<u64> {
        read_id(row, Self::KEY_COLUMN)
    }
}
