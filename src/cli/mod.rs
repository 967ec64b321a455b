use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::application::BillService;
use crate::domain::{amount_in_words, format_amount, parse_amount, parse_price, parse_quantity};

/// Billbook - line-item bills with totals in words
#[derive(Parser)]
#[command(name = "billbook")]
#[command(about = "Keep a line-item bill and print its total in Indian-numbering words")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "BILLBOOK_DB", default_value = "bill_entries.db")]
    pub database: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Add an item to the bill
    Add {
        /// Item name
        name: String,

        /// Unit price (e.g. "1,250.50"; up to 8 digits and 2 decimals)
        #[arg(short, long)]
        price: String,

        /// Quantity (up to 3 digits and 2 decimals, defaults to 1)
        #[arg(short, long)]
        quantity: Option<String>,

        /// Item date (YYYY-MM-DD, defaults to today, may not be in the past)
        #[arg(long)]
        date: Option<String>,
    },

    /// Remove an item by its row number as shown by `list`
    Remove {
        /// Row number (starting at 1)
        row: usize,
    },

    /// Remove all items
    Clear,

    /// Show the bill
    List,

    /// Show the grand total and the total in words
    Total,

    /// Print an amount in words (no database needed)
    Words {
        /// Amount, e.g. "1234567.89"
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Export the bill
    Export {
        /// Format: csv, json
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },
}

impl Cli {
    fn init_tracing(&self) {
        let default_level = if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        };
        let filter = EnvFilter::builder()
            .with_default_directive(default_level.into())
            .from_env_lossy();

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .ok();
    }

    pub async fn run(self) -> Result<()> {
        self.init_tracing();

        match self.command {
            Commands::Init => {
                let service = BillService::init(&self.database).await?;
                println!(
                    "Database initialized: {} ({} items)",
                    self.database,
                    service.ledger().len()
                );
            }

            Commands::Add {
                name,
                price,
                quantity,
                date,
            } => {
                let mut service = BillService::connect(&self.database).await?;

                let unit_price = parse_price(&price)
                    .with_context(|| format!("Invalid price '{}'. Use e.g. '1,250.50'", price))?;
                let quantity = parse_quantity(quantity.as_deref().unwrap_or(""))
                    .context("Invalid quantity. Use e.g. '2' or '1.5'")?;
                let date = date
                    .map(|d| parse_date(&d))
                    .transpose()
                    .context("Invalid date")?;

                let item = service.add_item(name, quantity, unit_price, date).await?;

                println!(
                    "Added row {}: {} x {} = {}",
                    service.ledger().len(),
                    item.name(),
                    item.quantity(),
                    format_amount(item.total())
                );
                println!("Total: ₹{}", format_amount(service.grand_total()));
            }

            Commands::Remove { row } => {
                let mut service = BillService::connect(&self.database).await?;
                let index = row
                    .checked_sub(1)
                    .ok_or_else(|| anyhow::anyhow!("Row numbers start at 1"))?;

                let item = service.remove_item(index).await?;

                println!(
                    "Removed row {}: {} ({})",
                    row,
                    item.name(),
                    format_amount(item.total())
                );
                println!("Total: ₹{}", format_amount(service.grand_total()));
            }

            Commands::Clear => {
                let mut service = BillService::connect(&self.database).await?;
                service.clear().await?;
                println!("Bill cleared.");
            }

            Commands::List => {
                let service = BillService::connect(&self.database).await?;
                run_list_command(&service)?;
            }

            Commands::Total => {
                let service = BillService::connect(&self.database).await?;
                println!("Total: ₹{}", format_amount(service.grand_total()));
                println!("Total in Words: {}", service.total_in_words()?);
            }

            Commands::Words { amount } => {
                let value = parse_amount(&amount)
                    .with_context(|| format!("Invalid amount '{}'", amount))?;
                println!("{}", amount_in_words(value)?);
            }

            Commands::Export { format, output } => {
                let service = BillService::connect(&self.database).await?;
                run_export_command(&service, &format, output.as_deref())?;
            }
        }

        Ok(())
    }
}

fn run_list_command(service: &BillService) -> Result<()> {
    let ledger = service.ledger();
    if ledger.is_empty() {
        println!("No items on the bill.");
        return Ok(());
    }

    println!(
        "{:>4} {:<24} {:>8} {:>14} {:>16} {:<10}",
        "#", "ITEM", "QTY", "PRICE", "TOTAL", "DATE"
    );
    println!("{}", "-".repeat(81));

    for (i, item) in ledger.iter().enumerate() {
        println!(
            "{:>4} {:<24} {:>8} {:>14} {:>16} {:<10}",
            i + 1,
            truncate(item.name(), 24),
            item.quantity(),
            format_amount(item.unit_price()),
            format_amount(item.total()),
            item.date().format("%Y-%m-%d")
        );
    }

    println!("{}", "-".repeat(81));
    println!("Total: ₹{}", format_amount(service.grand_total()));
    println!("Total in Words: {}", service.total_in_words()?);
    Ok(())
}

fn run_export_command(service: &BillService, format: &str, output: Option<&str>) -> Result<()> {
    use crate::io::Exporter;
    use std::fs::File;
    use std::io::{stdout, Write};

    let exporter = Exporter::new(service);

    // Determine output writer
    let writer: Box<dyn Write> = match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            Box::new(file)
        }
        None => Box::new(stdout()),
    };

    match format {
        "csv" => {
            let count = exporter.export_csv(writer)?;
            if output.is_some() {
                eprintln!("Exported {} items", count);
            }
        }
        "json" => {
            let document = exporter.export_json(writer)?;
            if output.is_some() {
                eprintln!(
                    "Exported {} items, total {}",
                    document.items.len(),
                    format_amount(document.grand_total)
                );
            }
        }
        _ => {
            anyhow::bail!("Invalid export format '{}'. Valid formats: csv, json", format);
        }
    }

    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{}...", head)
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").context("Date must be in YYYY-MM-DD format")
}
