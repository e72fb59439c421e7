//! # Product Entity
//!
//! An instrument listed on an exchange.
//!
//! Products reference their exchange by code only; the reference is not
//! checked. The numeric id is assigned by the store on creation.

use crate::domain::value_objects::{ProductType, Toggle};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A stored product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier.
    pub id: u64,
    /// Instrument classification.
    pub product_type: ProductType,
    /// Code of the owning exchange.
    pub exchange_code: String,
    /// Product code, unique within its exchange in practice.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: Toggle,
    /// Display flag.
    pub display: Toggle,
    /// Quote currency code.
    pub currency_code: String,
    /// Minimum price increment.
    pub tick_unit: Decimal,
    /// Minimum order size, if any.
    pub minimum_order: Option<Decimal>,
    /// Icon reference, if any.
    pub icon_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Fields supplied when a product is created.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewProduct {
    /// Instrument classification.
    pub product_type: ProductType,
    /// Code of the owning exchange.
    pub exchange_code: String,
    /// Product code.
    pub code: String,
    /// Display name.
    pub name: String,
    /// Lifecycle status.
    pub status: Toggle,
    /// Display flag.
    pub display: Toggle,
    /// Quote currency code.
    pub currency_code: String,
    /// Minimum price increment.
    pub tick_unit: Decimal,
    /// Minimum order size.
    pub minimum_order: Option<Decimal>,
    /// Icon reference.
    pub icon_id: Option<String>,
}

impl NewProduct {
    /// Creates an enabled, displayed product.
    #[must_use]
    pub fn new(
        product_type: ProductType,
        exchange_code: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            product_type,
            exchange_code: exchange_code.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    /// Materializes the stored product with the assigned id.
    #[must_use]
    pub fn into_product(self, id: u64, now: DateTime<Utc>) -> Product {
        Product {
            id,
            product_type: self.product_type,
            exchange_code: self.exchange_code,
            code: self.code,
            name: self.name,
            status: self.status,
            display: self.display,
            currency_code: self.currency_code,
            tick_unit: self.tick_unit,
            minimum_order: self.minimum_order,
            icon_id: self.icon_id,
            created_at: now,
            updated_at: now,
        }
    }
}
