use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ValidationError;

pub type LineItemId = Uuid;

/// Quantities have at most 3 integer digits.
pub const QUANTITY_LIMIT: Decimal = Decimal::from_parts(1_000, 0, 0, false, 0);

/// Unit prices have at most 8 integer digits.
pub const PRICE_LIMIT: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

/// Input for a new line item, as handed over by the input layer.
#[derive(Debug, Clone)]
pub struct NewLineItem {
    pub name: String,
    /// `None` means one unit
    pub quantity: Option<Decimal>,
    pub unit_price: Decimal,
    /// `None` means the day of entry
    pub date: Option<NaiveDate>,
}

impl NewLineItem {
    pub fn new(name: impl Into<String>, unit_price: Decimal) -> Self {
        Self {
            name: name.into(),
            quantity: None,
            unit_price,
            date: None,
        }
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}

/// One row of a bill. The line total is always derived from quantity and
/// unit price, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    id: LineItemId,
    name: String,
    quantity: Decimal,
    unit_price: Decimal,
    date: NaiveDate,
}

impl LineItem {
    /// Rebuild an item previously created by a ledger (e.g. from storage).
    /// Only [`LedgerStore::from_items`](super::LedgerStore::from_items)
    /// admits such items, and it re-checks them first.
    pub fn restore(
        id: LineItemId,
        name: String,
        quantity: Decimal,
        unit_price: Decimal,
        date: NaiveDate,
    ) -> Self {
        Self {
            id,
            name,
            quantity,
            unit_price,
            date,
        }
    }

    /// Validate a new item against `today` and build it with a fresh id.
    pub(crate) fn create(input: NewLineItem, today: NaiveDate) -> Result<Self, ValidationError> {
        let name = input.name.trim();
        let quantity = input.quantity.unwrap_or(Decimal::ONE);
        let date = input.date.unwrap_or(today);

        check_fields(name, quantity, input.unit_price)?;
        if date < today {
            return Err(ValidationError::BackDated { date, today });
        }

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_string(),
            quantity,
            unit_price: input.unit_price,
            date,
        })
    }

    /// Check the invariants every item in a ledger satisfies.
    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        check_fields(&self.name, self.quantity, self.unit_price)
    }

    pub fn id(&self) -> LineItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// quantity * unit price
    pub fn total(&self) -> Decimal {
        self.quantity * self.unit_price
    }
}

fn check_fields(name: &str, quantity: Decimal, unit_price: Decimal) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveQuantity(quantity));
    }
    if unit_price <= Decimal::ZERO {
        return Err(ValidationError::NonPositivePrice(unit_price));
    }
    if quantity >= QUANTITY_LIMIT {
        return Err(ValidationError::QuantityTooLarge {
            value: quantity,
            limit: QUANTITY_LIMIT,
        });
    }
    if unit_price >= PRICE_LIMIT {
        return Err(ValidationError::PriceTooLarge {
            value: unit_price,
            limit: PRICE_LIMIT,
        });
    }
    Ok(())
}
