mod common;

use anyhow::Result;
use billbook::io::{BillDocument, Exporter};
use common::{test_service, GroceryBill};
use rust_decimal_macros::dec;

#[tokio::test]
async fn test_export_csv() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    GroceryBill::create(&mut service).await?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&service).export_csv(&mut buffer)?;
    assert_eq!(count, 3);

    let mut reader = csv::Reader::from_reader(buffer.as_slice());
    let headers = reader.headers()?.clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec!["#", "item_name", "quantity", "price", "total", "date"]
    );

    let records: Vec<csv::StringRecord> = reader.records().collect::<Result<_, _>>()?;
    assert_eq!(records.len(), 4);

    assert_eq!(&records[0][0], "1");
    assert_eq!(&records[0][1], "Rice");
    assert_eq!(&records[1][1], "Dal");
    assert_eq!(&records[1][2], "1.5");

    let total_row = &records[3];
    assert_eq!(&total_row[0], "TOTAL");
    assert_eq!(
        &total_row[1],
        "Three Hundred Fifteen Rupees and Seventy Five Paise"
    );
    assert_eq!(total_row[4].parse::<rust_decimal::Decimal>()?, dec!(315.75));

    Ok(())
}

#[tokio::test]
async fn test_export_csv_empty_bill() -> Result<()> {
    let (service, _temp) = test_service().await?;

    let mut buffer = Vec::new();
    let count = Exporter::new(&service).export_csv(&mut buffer)?;
    assert_eq!(count, 0);

    let output = String::from_utf8(buffer)?;
    assert!(output.contains("TOTAL,Zero Rupees"));

    Ok(())
}

#[tokio::test]
async fn test_export_json() -> Result<()> {
    let (mut service, _temp) = test_service().await?;
    GroceryBill::create(&mut service).await?;

    let mut buffer = Vec::new();
    let exported = Exporter::new(&service).export_json(&mut buffer)?;

    let parsed: BillDocument = serde_json::from_slice(&buffer)?;
    assert_eq!(parsed.items.len(), 3);
    assert_eq!(parsed.items[2].row, 3);
    assert_eq!(parsed.items[2].item_name, "Soap");
    assert_eq!(parsed.items[1].total, dec!(180.75));
    assert_eq!(parsed.grand_total, dec!(315.75));
    assert_eq!(parsed.total_in_words, exported.total_in_words);

    Ok(())
}
