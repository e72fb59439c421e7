//! # Domain Enums
//!
//! Enumeration types for catalog concepts.
//!
//! - [`ProductType`] - Instrument classification (stock, crypto, forex, futures)
//! - [`Toggle`] - The 1=enabled / 2=disabled encoding shared by status and display flags
//! - [`HolidayKind`] - Full or half trading day closures
//!
//! All enums are stored as small integers and convert through `TryFrom<i32>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Classification of a tradeable product.
///
/// `None` is the unset value; only `Stock..=Futures` are accepted when a
/// product is created.
///
/// # Examples
///
/// ```
/// use product_catalog::domain::value_objects::enums::ProductType;
///
/// assert!(ProductType::Crypto.is_tradeable());
/// assert!(!ProductType::None.is_tradeable());
/// assert_eq!(ProductType::try_from(4), Ok(ProductType::Futures));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ProductType {
    /// No classification.
    #[default]
    None = 0,
    /// Equity.
    Stock = 1,
    /// Cryptocurrency.
    Crypto = 2,
    /// Currency pair.
    Forex = 3,
    /// Futures contract.
    Futures = 4,
}

impl ProductType {
    /// Returns the stored integer value.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns true if products of this type can be listed.
    #[inline]
    #[must_use]
    pub const fn is_tradeable(self) -> bool {
        !matches!(self, Self::None)
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Stock => "STOCK",
            Self::Crypto => "CRYPTO",
            Self::Forex => "FOREX",
            Self::Futures => "FUTURES",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ProductType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "NONE" => Ok(Self::None),
            "STOCK" => Ok(Self::Stock),
            "CRYPTO" => Ok(Self::Crypto),
            "FOREX" => Ok(Self::Forex),
            "FUTURES" => Ok(Self::Futures),
            _ => Err(ParseEnumError::InvalidValue("ProductType", s.to_string())),
        }
    }
}

impl TryFrom<i32> for ProductType {
    type Error = ParseEnumError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Stock),
            2 => Ok(Self::Crypto),
            3 => Ok(Self::Forex),
            4 => Ok(Self::Futures),
            _ => Err(ParseEnumError::InvalidValue("ProductType", value.to_string())),
        }
    }
}

/// Enabled/disabled flag used for both the lifecycle status and the
/// display flag of exchanges and products.
///
/// Zero is reserved for "unset" and has no variant.
///
/// # Examples
///
/// ```
/// use product_catalog::domain::value_objects::enums::Toggle;
///
/// assert_eq!(Toggle::try_from(1), Ok(Toggle::Enabled));
/// assert!(Toggle::try_from(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum Toggle {
    /// Enabled.
    #[default]
    Enabled = 1,
    /// Disabled.
    Disabled = 2,
}

impl Toggle {
    /// Returns the stored integer value.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns true if enabled.
    #[inline]
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enabled => write!(f, "ENABLED"),
            Self::Disabled => write!(f, "DISABLED"),
        }
    }
}

impl TryFrom<i32> for Toggle {
    type Error = ParseEnumError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::Enabled),
            2 => Ok(Self::Disabled),
            _ => Err(ParseEnumError::InvalidValue("Toggle", value.to_string())),
        }
    }
}

/// Kind of exchange holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum HolidayKind {
    /// Unclassified.
    #[default]
    None = 0,
    /// Market closed for the whole day.
    FullDay = 1,
    /// Market closes early.
    HalfDay = 2,
}

impl HolidayKind {
    /// Returns the stored integer value.
    #[inline]
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for HolidayKind {
    type Error = ParseEnumError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::FullDay),
            2 => Ok(Self::HalfDay),
            _ => Err(ParseEnumError::InvalidValue("HolidayKind", value.to_string())),
        }
    }
}

/// Error type for parsing enum values from strings or stored integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseEnumError {
    /// The provided value is not valid for the enum.
    InvalidValue(&'static str, String),
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidValue(enum_name, value) => {
                write!(f, "invalid {} value: '{}'", enum_name, value)
            }
        }
    }
}

impl std::error::Error for ParseEnumError {}
