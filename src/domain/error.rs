use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Rejected input to [`LedgerStore::add_item`](super::LedgerStore::add_item).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Item name must not be empty")]
    EmptyName,

    #[error("Quantity must be positive, got {0}")]
    NonPositiveQuantity(Decimal),

    #[error("Price must be positive, got {0}")]
    NonPositivePrice(Decimal),

    #[error("Quantity {value} must be below {limit}")]
    QuantityTooLarge { value: Decimal, limit: Decimal },

    #[error("Price {value} must be below {limit}")]
    PriceTooLarge { value: Decimal, limit: Decimal },

    #[error("Item date {date} is before today ({today})")]
    BackDated { date: NaiveDate, today: NaiveDate },
}

/// Row position outside the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("No item at position {index} (ledger has {len} items)")]
pub struct IndexError {
    pub index: usize,
    pub len: usize,
}

/// Amount outside the domain of the words formatter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Cannot express a negative amount in words: {0}")]
    NegativeAmount(Decimal),

    #[error("Amount too large to express in words: {0}")]
    OutOfRange(Decimal),
}
