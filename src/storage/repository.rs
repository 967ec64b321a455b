use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{LineItem, LineItemId};

use super::MIGRATION_001_INITIAL;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite mirror of a bill ledger.
///
/// Rows are kept in insertion order by an autoincrement `seq` column and
/// keyed by the line item id. The `total` column is written for outside
/// readers only; loading never reads it back.
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    /// Create a new repository with the given SQLite connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to a SQLite database at the given URL.
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = SqlitePool::connect(database_url)
            .await
            .context("Failed to connect to database")?;
        Ok(Self::new(pool))
    }

    /// Run database migrations.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(MIGRATION_001_INITIAL)
            .execute(&self.pool)
            .await
            .context("Failed to run migration 001")?;
        Ok(())
    }

    /// Initialize a new database (connect + migrate).
    pub async fn init(database_url: &str) -> Result<Self> {
        let repo = Self::connect(database_url).await?;
        repo.migrate().await?;
        Ok(repo)
    }

    /// Append an item after every row already stored.
    pub async fn save_item(&self, item: &LineItem) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO bill_items (id, item_name, quantity, price, total, entry_date)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(item.id().to_string())
        .bind(item.name())
        .bind(item.quantity().to_string())
        .bind(item.unit_price().to_string())
        .bind(item.total().to_string())
        .bind(item.date().format(DATE_FORMAT).to_string())
        .execute(&self.pool)
        .await
        .context("Failed to save bill item")?;

        debug!(id = %item.id(), name = item.name(), "stored bill item");
        Ok(())
    }

    /// Delete one item by id. Returns false when no row had that id.
    pub async fn delete_item(&self, id: LineItemId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bill_items WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .context("Failed to delete bill item")?;

        debug!(%id, rows = result.rows_affected(), "deleted bill item");
        Ok(result.rows_affected() > 0)
    }

    /// Delete every item. Returns the number of rows removed.
    pub async fn clear_items(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM bill_items")
            .execute(&self.pool)
            .await
            .context("Failed to clear bill items")?;

        debug!(rows = result.rows_affected(), "cleared bill items");
        Ok(result.rows_affected())
    }

    /// List all items in insertion order.
    pub async fn list_items(&self) -> Result<Vec<LineItem>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_name, quantity, price, entry_date
            FROM bill_items
            ORDER BY seq
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to list bill items")?;

        rows.iter().map(Self::row_to_item).collect()
    }

    /// Count stored items.
    pub async fn count_items(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM bill_items")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count bill items")?;

        Ok(row.get("count"))
    }

    fn row_to_item(row: &sqlx::sqlite::SqliteRow) -> Result<LineItem> {
        let id_str: String = row.get("id");
        let quantity_str: String = row.get("quantity");
        let price_str: String = row.get("price");
        let date_str: String = row.get("entry_date");

        Ok(LineItem::restore(
            Uuid::parse_str(&id_str).context("Invalid bill item ID")?,
            row.get("item_name"),
            Decimal::from_str(&quantity_str).context("Invalid stored quantity")?,
            Decimal::from_str(&price_str).context("Invalid stored price")?,
            NaiveDate::parse_from_str(&date_str, DATE_FORMAT).context("Invalid stored date")?,
        ))
    }
}
