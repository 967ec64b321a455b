use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;

use super::{IndexError, LineItem, NewLineItem, ValidationError};

/// The ordered line items of one bill.
///
/// Insertion order is display and export order. Every item held here has a
/// non-empty name and positive quantity and price; input is validated before
/// it is appended, never after. The grand total is derived on every read.
#[derive(Debug, Clone, Default)]
pub struct LedgerStore {
    items: Vec<LineItem>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a ledger from items that were previously admitted by a ledger,
    /// keeping their order. The no-back-dating rule only applies when an item
    /// is created, so it is not re-checked here.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, ValidationError> {
        for item in &items {
            item.validate()?;
        }
        Ok(Self { items })
    }

    /// Validate and append a new item dated no earlier than the local date.
    pub fn add_item(&mut self, input: NewLineItem) -> Result<LineItem, ValidationError> {
        self.add_item_on(input, Local::now().date_naive())
    }

    /// Same as [`add_item`](Self::add_item) with an explicit current date.
    pub fn add_item_on(
        &mut self,
        input: NewLineItem,
        today: NaiveDate,
    ) -> Result<LineItem, ValidationError> {
        let item = LineItem::create(input, today)?;
        self.items.push(item.clone());
        Ok(item)
    }

    /// Remove the item at `index`; later items shift down by one.
    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, IndexError> {
        if index >= self.items.len() {
            return Err(IndexError {
                index,
                len: self.items.len(),
            });
        }
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Point-in-time copy of the items. Later mutation of the ledger does
    /// not affect a snapshot already handed out.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&LineItem> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line totals, zero for an empty ledger.
    pub fn grand_total(&self) -> Decimal {
        self.items.iter().map(LineItem::total).sum()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn ledger_with(items: &[(&str, Decimal, Decimal)]) -> LedgerStore {
        let mut ledger = LedgerStore::new();
        for (name, qty, price) in items {
            ledger
                .add_item_on(NewLineItem::new(*name, *price).with_quantity(*qty), today())
                .unwrap();
        }
        ledger
    }

    #[test]
    fn test_empty_ledger() {
        let ledger = LedgerStore::new();
        assert!(ledger.is_empty());
        assert!(ledger.items().is_empty());
        assert_eq!(ledger.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_add_item_grows_ledger_and_total() {
        let mut ledger = ledger_with(&[("Rice", dec!(2), dec!(50))]);
        let before = ledger.grand_total();

        let item = ledger
            .add_item_on(
                NewLineItem::new("Dal", dec!(120.50)).with_quantity(dec!(1.5)),
                today(),
            )
            .unwrap();

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.grand_total() - before, dec!(180.75));
        assert_eq!(ledger.get(1), Some(&item));
    }

    #[test]
    fn test_invalid_items_leave_ledger_unchanged() {
        let mut ledger = ledger_with(&[("Rice", dec!(2), dec!(50))]);
        let snapshot = ledger.items();

        let rejected = [
            NewLineItem::new("", dec!(1)).with_quantity(dec!(1)),
            NewLineItem::new("x", dec!(1)).with_quantity(dec!(0)),
            NewLineItem::new("x", dec!(0)).with_quantity(dec!(1)),
            NewLineItem::new("x", dec!(1)).with_quantity(dec!(-1)),
        ];
        for input in rejected {
            assert!(ledger.add_item_on(input, today()).is_err());
        }

        assert_eq!(ledger.items(), snapshot);
        assert_eq!(ledger.grand_total(), dec!(100));
    }

    #[test]
    fn test_remove_item_shifts_later_rows() {
        let mut ledger = ledger_with(&[
            ("Tea", dec!(1), dec!(10)),
            ("Tea", dec!(2), dec!(10)),
            ("Milk", dec!(1), dec!(30)),
        ]);

        let removed = ledger.remove_item(0).unwrap();

        assert_eq!(removed.quantity(), dec!(1));
        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.get(0).unwrap().quantity(), dec!(2));
        assert_eq!(ledger.get(1).unwrap().name(), "Milk");
        assert_eq!(ledger.grand_total(), dec!(50));
    }

    #[test]
    fn test_remove_only_item_empties_ledger() {
        let mut ledger = ledger_with(&[("Tea", dec!(1), dec!(10))]);
        ledger.remove_item(0).unwrap();
        assert!(ledger.is_empty());
        assert_eq!(ledger.grand_total(), Decimal::ZERO);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut empty = LedgerStore::new();
        assert_eq!(empty.remove_item(0), Err(IndexError { index: 0, len: 0 }));

        let mut ledger = ledger_with(&[("Tea", dec!(1), dec!(10))]);
        assert_eq!(ledger.remove_item(1), Err(IndexError { index: 1, len: 1 }));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut ledger = ledger_with(&[("Tea", dec!(1), dec!(10)), ("Milk", dec!(1), dec!(30))]);

        ledger.clear();
        assert!(ledger.items().is_empty());
        assert_eq!(ledger.grand_total(), Decimal::ZERO);

        ledger.clear();
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_snapshot_survives_later_mutation() {
        let mut ledger = ledger_with(&[("Tea", dec!(1), dec!(10)), ("Milk", dec!(1), dec!(30))]);
        let snapshot = ledger.items();

        ledger.remove_item(0).unwrap();
        ledger.clear();

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].name(), "Tea");
        assert_eq!(snapshot[1].name(), "Milk");
    }

    #[test]
    fn test_from_items_keeps_order_and_allows_past_dates() {
        let old = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let items = vec![
            LineItem::restore(Uuid::new_v4(), "B".into(), dec!(1), dec!(2), old),
            LineItem::restore(Uuid::new_v4(), "A".into(), dec!(3), dec!(4), old),
        ];

        let ledger = LedgerStore::from_items(items.clone()).unwrap();

        assert_eq!(ledger.items(), items);
        assert_eq!(ledger.grand_total(), dec!(14));
    }

    #[test]
    fn test_from_items_rejects_broken_rows() {
        let items = vec![LineItem::restore(
            Uuid::new_v4(),
            "A".into(),
            dec!(0),
            dec!(4),
            today(),
        )];

        assert_eq!(
            LedgerStore::from_items(items).unwrap_err(),
            ValidationError::NonPositiveQuantity(dec!(0))
        );
    }

    #[test]
    fn test_oversized_item_is_rejected_and_total_stays_computable() {
        let mut ledger = ledger_with(&[("Tea", dec!(1), dec!(10))]);

        let result = ledger.add_item_on(
            NewLineItem::new("x", dec!(1e17)).with_quantity(dec!(1e17)),
            today(),
        );

        assert!(matches!(result, Err(ValidationError::QuantityTooLarge { .. })));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.grand_total(), dec!(10));
    }
}
