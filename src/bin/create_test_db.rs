use std::error::Error;
use std::path::Path;
use std::process::exit;

use clap::Parser;
use rusqlite::Connection;
use time::macros::datetime;

use ledger_rs::{Transaction, count_transactions, create_transaction, initialize_db};

/// A utility for creating a test database for the transaction server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// File path to save the SQLite database to.
    #[arg(long, short)]
    output_path: String,
}

/// Create and populate a database for manual testing.
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let output_path = Path::new(&args.output_path);

    match output_path.extension() {
        None => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        Some(extension) if extension.is_empty() => {
            eprintln!("Output path must include a file extension (e.g., 'my_database.db').");
            exit(1);
        }
        _ => {}
    }

    if output_path.is_file() {
        eprintln!("File already exists at {output_path:#?}!");
        exit(1);
    }

    println!("Creating database at {output_path:#?}");
    let conn = Connection::open(output_path)?;

    initialize_db(&conn)?;

    println!("Creating sample transactions...");

    for transaction in sample_transactions() {
        create_transaction(&transaction, &conn)?;
    }

    println!("Created {} transactions.", count_transactions(&conn)?);
    println!("Success!");

    Ok(())
}

fn sample_transactions() -> Vec<Transaction> {
    vec![
        Transaction {
            date_time: datetime!(2023-01-01 8:15 UTC),
            cents_amount: 1999,
            currency_code: "USD".to_owned(),
            reference: "abc123".to_owned(),
            merchant_name: "Coffee Shop".to_owned(),
            merchant_city: "Seattle".to_owned(),
            merchant_country_code: "US".to_owned(),
            merchant_country_name: "United States".to_owned(),
            merchant_category_code: "5812".to_owned(),
            merchant_category_name: "Restaurants".to_owned(),
        },
        Transaction {
            date_time: datetime!(2023-01-02 17:40 UTC),
            cents_amount: 8450,
            currency_code: "GBP".to_owned(),
            reference: "def456".to_owned(),
            merchant_name: "Corner Grocer".to_owned(),
            merchant_city: "London".to_owned(),
            merchant_country_code: "GB".to_owned(),
            merchant_country_name: "United Kingdom".to_owned(),
            merchant_category_code: "5411".to_owned(),
            merchant_category_name: "Grocery Stores, Supermarkets".to_owned(),
        },
        Transaction {
            date_time: datetime!(2023-01-03 12:00 +13),
            cents_amount: -2500,
            currency_code: "NZD".to_owned(),
            reference: "ghi789".to_owned(),
            merchant_name: "Book Nook".to_owned(),
            merchant_city: "Wellington".to_owned(),
            merchant_country_code: "NZ".to_owned(),
            merchant_country_name: "New Zealand".to_owned(),
            merchant_category_code: "5942".to_owned(),
            merchant_category_name: "Book Stores".to_owned(),
        },
    ]
}
