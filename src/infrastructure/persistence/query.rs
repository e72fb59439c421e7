//! # Query Predicates
//!
//! Composition of optional filter fields into a conjunctive predicate.
//!
//! A [`Filter`] lowers itself into a list of [`Condition`]s. Unset fields
//! contribute nothing, so a filter with every field unset selects the whole
//! table. The same conditions are rendered to SQL by [`push_where`] and
//! evaluated against in-memory records through [`Columns`].
//!
//! # Examples
//!
//! ```
//! use product_catalog::infrastructure::persistence::query::{push_where, ConditionSet};
//! use sqlx::{Postgres, QueryBuilder};
//!
//! let conditions = ConditionSet::new()
//!     .eq_text("code", Some("NYSE"))
//!     .eq_text("name", Some(""))
//!     .is_in("status", [1, 2])
//!     .into_vec();
//!
//! let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM exchange");
//! push_where(&mut builder, "exchange", conditions);
//! assert_eq!(
//!     builder.sql(),
//!     "SELECT * FROM exchange WHERE exchange.code = $1 AND exchange.status IN ($2, $3)"
//! );
//! ```

use sqlx::{Postgres, QueryBuilder};
use std::fmt;

/// Value compared by a [`Condition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    /// Text column value.
    Text(String),
    /// 32-bit integer column value.
    Int(i32),
    /// 64-bit integer column value.
    BigInt(i64),
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for FilterValue {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i32> for FilterValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for FilterValue {
    fn from(value: i64) -> Self {
        Self::BigInt(value)
    }
}

impl From<u64> for FilterValue {
    fn from(value: u64) -> Self {
        Self::BigInt(i64::try_from(value).unwrap_or(i64::MAX))
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s),
            Self::Int(n) => write!(f, "{}", n),
            Self::BigInt(n) => write!(f, "{}", n),
        }
    }
}

/// A single predicate over one column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    /// `column = value`.
    Eq {
        /// Unqualified column name.
        column: &'static str,
        /// Compared value.
        value: FilterValue,
    },
    /// `column IN (values...)`.
    In {
        /// Unqualified column name.
        column: &'static str,
        /// Accepted values.
        values: Vec<FilterValue>,
    },
}

impl Condition {
    /// Returns the column this condition applies to.
    #[must_use]
    pub fn column(&self) -> &'static str {
        match self {
            Self::Eq { column, .. } | Self::In { column, .. } => column,
        }
    }

    /// Evaluates the condition against an in-memory record.
    ///
    /// A column the record does not expose never matches.
    pub fn matches<C: Columns + ?Sized>(&self, record: &C) -> bool {
        let Some(actual) = record.column(self.column()) else {
            return false;
        };
        match self {
            Self::Eq { value, .. } => *value == actual,
            Self::In { values, .. } => values.contains(&actual),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eq { column, value } => write!(f, "{} = {}", column, value),
            Self::In { column, values } => {
                let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
                write!(f, "{} IN ({})", column, rendered.join(", "))
            }
        }
    }
}

/// Builder that collects conditions for the fields that are set.
///
/// - text: kept when present and non-empty
/// - scalar: kept when present
/// - identifier: kept when present and non-zero
/// - list: kept when non-empty
#[derive(Debug, Clone, Default)]
pub struct ConditionSet {
    conditions: Vec<Condition>,
}

impl ConditionSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an equality on a text column.
    #[must_use]
    pub fn eq_text(mut self, column: &'static str, value: Option<&str>) -> Self {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.conditions.push(Condition::Eq {
                column,
                value: value.into(),
            });
        }
        self
    }

    /// Adds an equality on a scalar column.
    #[must_use]
    pub fn eq<V: Into<FilterValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(value) = value {
            self.conditions.push(Condition::Eq {
                column,
                value: value.into(),
            });
        }
        self
    }

    /// Adds an equality on a surrogate identifier column.
    #[must_use]
    pub fn eq_id(self, column: &'static str, value: Option<u64>) -> Self {
        self.eq(column, value.filter(|id| *id != 0))
    }

    /// Adds a membership test.
    #[must_use]
    pub fn is_in<I, V>(mut self, column: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        let values: Vec<FilterValue> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.conditions.push(Condition::In { column, values });
        }
        self
    }

    /// Returns the collected conditions.
    #[must_use]
    pub fn into_vec(self) -> Vec<Condition> {
        self.conditions
    }
}

/// A query filter over one table.
pub trait Filter: Send + Sync + fmt::Debug {
    /// Lowers the set fields into conditions, joined by `AND`.
    fn conditions(&self) -> Vec<Condition>;

    /// Evaluates the filter against an in-memory record.
    fn matches<C: Columns + ?Sized>(&self, record: &C) -> bool
    where
        Self: Sized,
    {
        self.conditions().iter().all(|c| c.matches(record))
    }
}

/// Column access for evaluating conditions in memory.
pub trait Columns {
    /// Returns the value of a column, or `None` when the record has no such
    /// column or the column is NULL.
    fn column(&self, name: &str) -> Option<FilterValue>;
}

/// Appends a `WHERE` clause for the conditions, qualified by table name.
///
/// Values are bound as parameters. An empty membership list renders as
/// `FALSE`.
pub fn push_where(
    builder: &mut QueryBuilder<'_, Postgres>,
    table: &str,
    conditions: Vec<Condition>,
) {
    for (index, condition) in conditions.into_iter().enumerate() {
        builder.push(if index == 0 { " WHERE " } else { " AND " });
        match condition {
            Condition::Eq { column, value } => {
                builder.push(format!("{}.{} = ", table, column));
                push_value(builder, value);
            }
            Condition::In { values, .. } if values.is_empty() => {
                builder.push("FALSE");
            }
            Condition::In { column, values } => {
                builder.push(format!("{}.{} IN (", table, column));
                for (position, value) in values.into_iter().enumerate() {
                    if position > 0 {
                        builder.push(", ");
                    }
                    push_value(builder, value);
                }
                builder.push(")");
            }
        }
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Postgres>, value: FilterValue) {
    match value {
        FilterValue::Text(s) => builder.push_bind(s),
        FilterValue::Int(n) => builder.push_bind(n),
        FilterValue::BigInt(n) => builder.push_bind(n),
    };
}
