// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use billbook::application::BillService;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

/// Helper to create a test service with a temporary database
pub async fn test_service() -> Result<(BillService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let service = BillService::init(&db_path(&temp_dir)).await?;
    Ok((service, temp_dir))
}

/// Path of the database inside a test directory
pub fn db_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("test.db").to_str().unwrap().to_string()
}

/// Reopen the database behind a test directory, as a new process would
pub async fn reopen(temp_dir: &TempDir) -> Result<BillService> {
    Ok(BillService::connect(&db_path(temp_dir)).await?)
}

/// Test fixture: a small grocery bill
pub struct GroceryBill;

impl GroceryBill {
    /// Rice 2 x 50, Dal 1.5 x 120.50, Soap 1 x 35 (total 315.75)
    pub async fn create(service: &mut BillService) -> Result<()> {
        service.add_item("Rice", Some(dec!(2)), dec!(50), None).await?;
        service
            .add_item("Dal", Some(dec!(1.5)), dec!(120.50), None)
            .await?;
        service.add_item("Soap", None, dec!(35), None).await?;
        Ok(())
    }

    pub fn total() -> Decimal {
        dec!(315.75)
    }
}
