use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::BillService;

/// Version tag written into JSON exports
pub const EXPORT_VERSION: &str = "1";

/// A bill as handed to presentation: ordered rows, grand total and the
/// total in words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillDocument {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub items: Vec<BillRow>,
    pub grand_total: Decimal,
    pub total_in_words: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillRow {
    /// 1-based row number as displayed
    pub row: usize,
    pub item_name: String,
    pub quantity: Decimal,
    pub price: Decimal,
    pub total: Decimal,
    pub date: NaiveDate,
}

/// Exporter for rendering the current bill to CSV or JSON
pub struct Exporter<'a> {
    service: &'a BillService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a BillService) -> Self {
        Self { service }
    }

    /// Build the document for the bill as it stands now.
    pub fn document(&self) -> Result<BillDocument> {
        let summary = self.service.summary()?;
        let items = summary
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| BillRow {
                row: i + 1,
                item_name: item.name().to_string(),
                quantity: item.quantity(),
                price: item.unit_price(),
                total: item.total(),
                date: item.date(),
            })
            .collect();

        Ok(BillDocument {
            version: EXPORT_VERSION.to_string(),
            exported_at: Utc::now(),
            items,
            grand_total: summary.grand_total,
            total_in_words: summary.total_in_words,
        })
    }

    /// Export the bill as CSV: one row per item, then a TOTAL row whose name
    /// column carries the total in words. Returns the number of item rows.
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let document = self.document()?;
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(["#", "item_name", "quantity", "price", "total", "date"])?;

        for row in &document.items {
            csv_writer.write_record([
                row.row.to_string(),
                row.item_name.clone(),
                row.quantity.to_string(),
                row.price.to_string(),
                row.total.to_string(),
                row.date.format("%Y-%m-%d").to_string(),
            ])?;
        }

        csv_writer.write_record([
            "TOTAL".to_string(),
            document.total_in_words.clone(),
            String::new(),
            String::new(),
            document.grand_total.to_string(),
            String::new(),
        ])?;

        csv_writer.flush()?;
        Ok(document.items.len())
    }

    /// Export the bill as pretty-printed JSON
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<BillDocument> {
        let document = self.document()?;
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writeln!(writer)?;
        Ok(document)
    }
}
