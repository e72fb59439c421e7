//! # Catalog Records
//!
//! [`Record`] bindings and query filters for every catalog entity.
//!
//! | Entity | Table | Key |
//! |--------|-------|-----|
//! | [`Exchange`] | `exchange` | code |
//! | [`Product`] | `product` | id |
//! | [`GroupPermissionPath`] | `group_permission_path` | id |
//! | [`ExchangeHoliday`] | `exchange_holiday` | id |

use crate::domain::entities::{
    Exchange, ExchangeHoliday, GroupPermissionPath, NewExchange, NewExchangeHoliday,
    NewGroupPermissionPath, NewProduct, Product,
};
use crate::domain::value_objects::{HolidayKind, ProductType, Toggle};
use crate::infrastructure::persistence::query::{
    Columns, Condition, ConditionSet, Filter, FilterValue,
};
use crate::infrastructure::persistence::traits::Record;

/// Filter over the `exchange` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeFilter {
    /// Exchange code.
    pub code: Option<String>,
    /// Lifecycle status.
    pub status: Option<Toggle>,
    /// Display flag.
    pub display: Option<Toggle>,
}

impl ExchangeFilter {
    /// Restricts to one exchange code.
    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Restricts to a lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: Toggle) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a display flag.
    #[must_use]
    pub fn with_display(mut self, display: Toggle) -> Self {
        self.display = Some(display);
        self
    }
}

impl Filter for ExchangeFilter {
    fn conditions(&self) -> Vec<Condition> {
        ConditionSet::new()
            .eq_text("code", self.code.as_deref())
            .eq("status", self.status.map(Toggle::as_i32))
            .eq("display", self.display.map(Toggle::as_i32))
            .into_vec()
    }
}

impl Record for Exchange {
    type Key = String;
    type New = NewExchange;
    type Filter = ExchangeFilter;

    const ENTITY: &'static str = "Exchange";
    const TABLE: &'static str = "exchange";

    fn key(&self) -> String {
        self.code.clone()
    }
}

impl Columns for Exchange {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "code" => Some(self.code.as_str().into()),
            "product_type" => Some(self.product_type.as_i32().into()),
            "status" => Some(self.status.as_i32().into()),
            "display" => Some(self.display.as_i32().into()),
            "country_code" => Some(self.country_code.as_str().into()),
            _ => None,
        }
    }
}

/// Filter over the `product` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Store-assigned id; zero is treated as unset.
    pub id: Option<u64>,
    /// Single owning exchange.
    pub exchange_code: Option<String>,
    /// Product code.
    pub code: Option<String>,
    /// Accepted product types.
    pub product_types: Vec<ProductType>,
    /// Accepted owning exchanges.
    pub exchange_codes: Vec<String>,
    /// Lifecycle status.
    pub status: Option<Toggle>,
    /// Display flag.
    pub display: Option<Toggle>,
}

impl ProductFilter {
    /// Restricts to one product id.
    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Restricts to an exchange code and product code pair.
    #[must_use]
    pub fn with_codes(mut self, exchange_code: impl Into<String>, code: impl Into<String>) -> Self {
        self.exchange_code = Some(exchange_code.into());
        self.code = Some(code.into());
        self
    }

    /// Restricts to the given product types.
    #[must_use]
    pub fn with_product_types(mut self, product_types: impl IntoIterator<Item = ProductType>) -> Self {
        self.product_types = product_types.into_iter().collect();
        self
    }

    /// Restricts to the given owning exchanges.
    #[must_use]
    pub fn with_exchange_codes<S: Into<String>>(
        mut self,
        exchange_codes: impl IntoIterator<Item = S>,
    ) -> Self {
        self.exchange_codes = exchange_codes.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts to a lifecycle status.
    #[must_use]
    pub fn with_status(mut self, status: Toggle) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts to a display flag.
    #[must_use]
    pub fn with_display(mut self, display: Toggle) -> Self {
        self.display = Some(display);
        self
    }
}

impl Filter for ProductFilter {
    fn conditions(&self) -> Vec<Condition> {
        ConditionSet::new()
            .eq_id("id", self.id)
            .eq_text("exchange_code", self.exchange_code.as_deref())
            .eq_text("code", self.code.as_deref())
            .is_in("type", self.product_types.iter().map(|t| t.as_i32()))
            .is_in("exchange_code", self.exchange_codes.iter())
            .eq("status", self.status.map(Toggle::as_i32))
            .eq("display", self.display.map(Toggle::as_i32))
            .into_vec()
    }
}

impl Record for Product {
    type Key = u64;
    type New = NewProduct;
    type Filter = ProductFilter;

    const ENTITY: &'static str = "Product";
    const TABLE: &'static str = "product";

    fn key(&self) -> u64 {
        self.id
    }
}

impl Columns for Product {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "type" => Some(self.product_type.as_i32().into()),
            "exchange_code" => Some(self.exchange_code.as_str().into()),
            "code" => Some(self.code.as_str().into()),
            "status" => Some(self.status.as_i32().into()),
            "display" => Some(self.display.as_i32().into()),
            "currency_code" => Some(self.currency_code.as_str().into()),
            "icon_id" => self.icon_id.as_deref().map(Into::into),
            _ => None,
        }
    }
}

/// Filter over the `group_permission_path` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPermissionPathFilter {
    /// Permission group; zero is treated as unset.
    pub group_id: Option<u64>,
    /// HTTP method.
    pub method: Option<String>,
    /// Path pattern.
    pub path: Option<String>,
}

impl GroupPermissionPathFilter {
    /// Restricts to one permission group.
    #[must_use]
    pub fn with_group(mut self, group_id: u64) -> Self {
        self.group_id = Some(group_id);
        self
    }

    /// Restricts to one HTTP method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Restricts to one path pattern.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

impl Filter for GroupPermissionPathFilter {
    fn conditions(&self) -> Vec<Condition> {
        ConditionSet::new()
            .eq_id("group_id", self.group_id)
            .eq_text("method", self.method.as_deref())
            .eq_text("path", self.path.as_deref())
            .into_vec()
    }
}

impl Record for GroupPermissionPath {
    type Key = u64;
    type New = NewGroupPermissionPath;
    type Filter = GroupPermissionPathFilter;

    const ENTITY: &'static str = "GroupPermissionPath";
    const TABLE: &'static str = "group_permission_path";

    fn key(&self) -> u64 {
        self.id
    }
}

impl Columns for GroupPermissionPath {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "group_id" => Some(self.group_id.into()),
            "method" => Some(self.method.as_str().into()),
            "path" => Some(self.path.as_str().into()),
            _ => None,
        }
    }
}

/// Filter over the `exchange_holiday` table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExchangeHolidayFilter {
    /// Affected exchange.
    pub exchange_code: Option<String>,
    /// Holiday kind.
    pub kind: Option<HolidayKind>,
}

impl ExchangeHolidayFilter {
    /// Restricts to one exchange.
    #[must_use]
    pub fn with_exchange_code(mut self, exchange_code: impl Into<String>) -> Self {
        self.exchange_code = Some(exchange_code.into());
        self
    }

    /// Restricts to one holiday kind.
    #[must_use]
    pub fn with_kind(mut self, kind: HolidayKind) -> Self {
        self.kind = Some(kind);
        self
    }
}

impl Filter for ExchangeHolidayFilter {
    fn conditions(&self) -> Vec<Condition> {
        ConditionSet::new()
            .eq_text("exchange_code", self.exchange_code.as_deref())
            .eq("type", self.kind.map(HolidayKind::as_i32))
            .into_vec()
    }
}

impl Record for ExchangeHoliday {
    type Key = u64;
    type New = NewExchangeHoliday;
    type Filter = ExchangeHolidayFilter;

    const ENTITY: &'static str = "ExchangeHoliday";
    const TABLE: &'static str = "exchange_holiday";

    fn key(&self) -> u64 {
        self.id
    }
}

impl Columns for ExchangeHoliday {
    fn column(&self, name: &str) -> Option<FilterValue> {
        match name {
            "id" => Some(self.id.into()),
            "exchange_code" => Some(self.exchange_code.as_str().into()),
            "type" => Some(self.kind.as_i32().into()),
            _ => None,
        }
    }
}
