use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::domain::{amount_in_words, LedgerStore, LineItem, NewLineItem};
use crate::storage::Repository;

use super::AppError;

/// Application service for one bill.
///
/// The in-memory [`LedgerStore`] is the source of truth. Every mutation is
/// applied to a copy of the store first, mirrored to the repository, and only
/// then committed, so a storage failure leaves the bill as it was.
pub struct BillService {
    repo: Repository,
    ledger: LedgerStore,
}

/// Everything a presentation layer needs to render a bill
#[derive(Debug, Clone, Serialize)]
pub struct BillSummary {
    pub items: Vec<LineItem>,
    pub grand_total: Decimal,
    pub total_in_words: String,
}

impl BillService {
    /// Create a service over a repository, loading the bill stored in it.
    pub async fn load(repo: Repository) -> Result<Self, AppError> {
        let items = repo.list_items().await?;
        let ledger = LedgerStore::from_items(items).map_err(AppError::InvalidStoredItem)?;
        info!(items = ledger.len(), "loaded bill");
        Ok(Self { repo, ledger })
    }

    /// Initialize a database at the given path (creating it if needed).
    pub async fn init(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}?mode=rwc", database_path);
        let repo = Repository::init(&db_url).await?;
        Self::load(repo).await
    }

    /// Connect to an existing database.
    pub async fn connect(database_path: &str) -> Result<Self, AppError> {
        let db_url = format!("sqlite:{}", database_path);
        let repo = Repository::connect(&db_url).await?;
        Self::load(repo).await
    }

    /// Validate and append a new item.
    pub async fn add_item(
        &mut self,
        name: impl Into<String>,
        quantity: Option<Decimal>,
        unit_price: Decimal,
        date: Option<NaiveDate>,
    ) -> Result<LineItem, AppError> {
        let input = NewLineItem {
            name: name.into(),
            quantity,
            unit_price,
            date,
        };

        let mut next = self.ledger.clone();
        let item = next.add_item(input)?;
        self.repo.save_item(&item).await?;
        self.ledger = next;

        info!(
            name = item.name(),
            quantity = %item.quantity(),
            price = %item.unit_price(),
            "added bill item"
        );
        Ok(item)
    }

    /// Remove the item at a zero-based row position.
    pub async fn remove_item(&mut self, index: usize) -> Result<LineItem, AppError> {
        let mut next = self.ledger.clone();
        let item = next.remove_item(index)?;
        if !self.repo.delete_item(item.id()).await? {
            warn!(id = %item.id(), "removed item had no stored row");
        }
        self.ledger = next;

        info!(index, name = item.name(), "removed bill item");
        Ok(item)
    }

    /// Remove every item. Clearing an empty bill is not an error.
    pub async fn clear(&mut self) -> Result<(), AppError> {
        self.repo.clear_items().await?;
        let count = self.ledger.len();
        self.ledger.clear();

        info!(items = count, "cleared bill");
        Ok(())
    }

    pub fn items(&self) -> Vec<LineItem> {
        self.ledger.items()
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn grand_total(&self) -> Decimal {
        self.ledger.grand_total()
    }

    /// Grand total in Indian-numbering words.
    pub fn total_in_words(&self) -> Result<String, AppError> {
        Ok(amount_in_words(self.ledger.grand_total())?)
    }

    pub fn summary(&self) -> Result<BillSummary, AppError> {
        Ok(BillSummary {
            items: self.ledger.items(),
            grand_total: self.ledger.grand_total(),
            total_in_words: self.total_in_words()?,
        })
    }

    /// Number of rows currently stored, for consistency checks.
    pub async fn stored_count(&self) -> Result<i64, AppError> {
        Ok(self.repo.count_items().await?)
    }
}
