use serde::{Deserialize, Deserializer, Serialize, Serializer};

use coffeeshop_core::{DomainError, DomainResult, Entity, MenuItemId, ValueObject};

/// Non-negative currency amount, held in hundredths.
///
/// Serialized as a JSON number (`800.5`, `900.0`) so clients see the same
/// decimal shape they would get from a document store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(i64);

impl Price {
    /// Largest decimal amount that still fits in the minor-unit column.
    const MAX_DECIMAL: f64 = (i64::MAX / 100) as f64;

    pub fn from_cents(cents: i64) -> DomainResult<Self> {
        if cents < 0 {
            return Err(DomainError::validation(format!(
                "price must be non-negative (got {cents} cents)"
            )));
        }
        Ok(Self(cents))
    }

    /// Build a price from a decimal amount, rounding to the nearest hundredth.
    pub fn from_decimal(amount: f64) -> DomainResult<Self> {
        if !amount.is_finite() {
            return Err(DomainError::validation("price must be a finite number"));
        }
        if amount < 0.0 {
            return Err(DomainError::validation(format!(
                "price must be non-negative (got {amount})"
            )));
        }
        if amount > Self::MAX_DECIMAL {
            return Err(DomainError::validation(format!("price {amount} is too large")));
        }
        Ok(Self((amount * 100.0).round() as i64))
    }

    pub fn cents(&self) -> i64 {
        self.0
    }

    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_decimal())
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Price::from_decimal(amount).map_err(serde::de::Error::custom)
    }
}

fn validate_name(name: &str) -> DomainResult<()> {
    if name.trim().is_empty() {
        return Err(DomainError::validation("menu item name must not be empty"));
    }
    Ok(())
}

/// A menu item before the store has assigned it an identifier.
///
/// This is what the seed loader hands to [`crate::ItemStore::replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMenuItem {
    name: String,
    category: String,
    price: Price,
    in_stock: bool,
}

impl NewMenuItem {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        in_stock: bool,
    ) -> DomainResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            category: category.into(),
            price,
            in_stock,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }

    /// Attach a store-assigned identifier.
    pub fn into_item(self, id: MenuItemId) -> MenuItem {
        MenuItem {
            id,
            name: self.name,
            category: self.category,
            price: self.price,
            in_stock: self.in_stock,
        }
    }
}

/// A persisted menu item.
///
/// JSON shape: `{ "id", "name", "category", "price", "inStock" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMenuItem")]
pub struct MenuItem {
    id: MenuItemId,
    name: String,
    category: String,
    price: Price,
    in_stock: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMenuItem {
    id: MenuItemId,
    name: String,
    category: String,
    price: Price,
    in_stock: bool,
}

impl TryFrom<RawMenuItem> for MenuItem {
    type Error = DomainError;

    fn try_from(raw: RawMenuItem) -> Result<Self, Self::Error> {
        MenuItem::new(raw.id, raw.name, raw.category, raw.price, raw.in_stock)
    }
}

impl MenuItem {
    /// Rebuild a stored record, re-checking the model invariants.
    pub fn new(
        id: MenuItemId,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Price,
        in_stock: bool,
    ) -> DomainResult<Self> {
        Ok(NewMenuItem::new(name, category, price, in_stock)?.into_item(id))
    }

    pub fn id(&self) -> MenuItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn in_stock(&self) -> bool {
        self.in_stock
    }
}

impl Entity for MenuItem {
    type Id = MenuItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
