//! Defines the core data model and database queries for transactions.

use rusqlite::{Connection, Row, named_params};
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, macros::datetime};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The date-time that clients send when they leave the field at its zero value.
const UNSET_DATE_TIME: OffsetDateTime = datetime!(0001-01-01 0:00 UTC);

/// A financial event where money was spent at, or refunded by, a merchant.
///
/// Transactions are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// When the transaction happened.
    #[serde(with = "time::serde::rfc3339")]
    pub date_time: OffsetDateTime,
    /// The amount of money in minor currency units, e.g. cents.
    ///
    /// Negative values represent refunds.
    pub cents_amount: i64,
    /// The currency of `cents_amount`, e.g. "USD".
    pub currency_code: String,
    /// The reference provided by the card issuer.
    pub reference: String,
    /// The name of the merchant, e.g. "Coffee Shop".
    pub merchant_name: String,
    /// The city the merchant is located in.
    pub merchant_city: String,
    /// The country code of the merchant, e.g. "US".
    pub merchant_country_code: String,
    /// The full name of the merchant's country.
    pub merchant_country_name: String,
    /// The merchant category code (MCC), e.g. "5812".
    pub merchant_category_code: String,
    /// The human readable name of the merchant category.
    pub merchant_category_name: String,
}

impl Transaction {
    /// Check that every field holds a non-zero value.
    ///
    /// # Errors
    /// Returns [Error::InvalidTransaction] naming the first field that is
    /// empty, or zero in the case of `centsAmount` and `dateTime`.
    pub fn validate(&self) -> Result<(), Error> {
        if self.date_time == UNSET_DATE_TIME {
            return Err(missing_field("dateTime"));
        }

        if self.cents_amount == 0 {
            return Err(missing_field("centsAmount"));
        }

        let text_fields = [
            ("currencyCode", &self.currency_code),
            ("reference", &self.reference),
            ("merchantName", &self.merchant_name),
            ("merchantCity", &self.merchant_city),
            ("merchantCountryCode", &self.merchant_country_code),
            ("merchantCountryName", &self.merchant_country_name),
            ("merchantCategoryCode", &self.merchant_category_code),
            ("merchantCategoryName", &self.merchant_category_name),
        ];

        match text_fields.iter().find(|(_, value)| value.is_empty()) {
            Some((name, _)) => Err(missing_field(name)),
            None => Ok(()),
        }
    }
}

fn missing_field(name: &str) -> Error {
    Error::InvalidTransaction(format!("the field `{name}` is required and cannot be empty"))
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create the transaction table in the database if it does not already exist.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                date_time TEXT NOT NULL,
                cents_amount INTEGER NOT NULL,
                currency_code TEXT NOT NULL,
                reference TEXT NOT NULL,
                merchant_name TEXT NOT NULL,
                merchant_city TEXT NOT NULL,
                merchant_country_code TEXT NOT NULL,
                merchant_country_name TEXT NOT NULL,
                merchant_category_code TEXT NOT NULL,
                merchant_category_name TEXT NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert `transaction` into the database as a new row.
///
/// The insert runs in its own SQL transaction which is only committed if the
/// insert succeeds.
///
/// # Errors
/// This function will return a [Error::SqlError] if the insert fails, in which
/// case nothing is written.
pub fn create_transaction(transaction: &Transaction, connection: &Connection) -> Result<(), Error> {
    let tx = connection.unchecked_transaction()?;

    // Dropping `tx` without committing rolls it back.
    tx.execute(
        "INSERT INTO \"transaction\" (
            date_time, cents_amount, currency_code, reference, merchant_name,
            merchant_city, merchant_country_code, merchant_country_name,
            merchant_category_code, merchant_category_name
        ) VALUES (
            :date_time, :cents_amount, :currency_code, :reference, :merchant_name,
            :merchant_city, :merchant_country_code, :merchant_country_name,
            :merchant_category_code, :merchant_category_name
        )",
        named_params! {
            ":date_time": transaction.date_time,
            ":cents_amount": transaction.cents_amount,
            ":currency_code": transaction.currency_code,
            ":reference": transaction.reference,
            ":merchant_name": transaction.merchant_name,
            ":merchant_city": transaction.merchant_city,
            ":merchant_country_code": transaction.merchant_country_code,
            ":merchant_country_name": transaction.merchant_country_name,
            ":merchant_category_code": transaction.merchant_category_code,
            ":merchant_category_name": transaction.merchant_category_name,
        },
    )?;

    tx.commit()?;

    Ok(())
}

/// Retrieve every transaction in the database in the order they were stored.
///
/// # Errors
/// This function will return a [Error::SqlError] if the query fails or a row
/// cannot be mapped to a [Transaction]. No partial results are returned.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT date_time, cents_amount, currency_code, reference, merchant_name,
                merchant_city, merchant_country_code, merchant_country_name,
                merchant_category_code, merchant_category_name
            FROM \"transaction\"
            ORDER BY id ASC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(Error::from)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        date_time: row.get(0)?,
        cents_amount: row.get(1)?,
        currency_code: row.get(2)?,
        reference: row.get(3)?,
        merchant_name: row.get(4)?,
        merchant_city: row.get(5)?,
        merchant_country_code: row.get(6)?,
        merchant_country_name: row.get(7)?,
        merchant_category_code: row.get(8)?,
        merchant_category_name: row.get(9)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use crate::{
        Error,
        transaction::{Transaction, test_utils::coffee_transaction},
    };

    #[test]
    fn valid_transaction_passes() {
        assert_eq!(coffee_transaction().validate(), Ok(()));
    }

    #[test]
    fn negative_amount_is_valid() {
        let transaction = Transaction {
            cents_amount: -1999,
            ..coffee_transaction()
        };

        assert_eq!(transaction.validate(), Ok(()));
    }

    #[test]
    fn zero_amount_fails() {
        let transaction = Transaction {
            cents_amount: 0,
            ..coffee_transaction()
        };

        assert_invalid_field(transaction.validate(), "centsAmount");
    }

    #[test]
    fn empty_currency_code_fails() {
        let transaction = Transaction {
            currency_code: String::new(),
            ..coffee_transaction()
        };

        assert_invalid_field(transaction.validate(), "currencyCode");
    }

    #[test]
    fn empty_merchant_category_name_fails() {
        let transaction = Transaction {
            merchant_category_name: String::new(),
            ..coffee_transaction()
        };

        assert_invalid_field(transaction.validate(), "merchantCategoryName");
    }

    #[test]
    fn zero_date_time_fails() {
        let transaction: Transaction = serde_json::from_value(serde_json::json!({
            "dateTime": "0001-01-01T00:00:00Z",
            "centsAmount": 1999,
            "currencyCode": "USD",
            "reference": "abc123",
            "merchantName": "Coffee Shop",
            "merchantCity": "Seattle",
            "merchantCountryCode": "US",
            "merchantCountryName": "United States",
            "merchantCategoryCode": "5812",
            "merchantCategoryName": "Restaurants"
        }))
        .unwrap();

        assert_invalid_field(transaction.validate(), "dateTime");
    }

    #[test]
    fn deserializing_empty_object_names_missing_field() {
        let error = serde_json::from_str::<Transaction>("{}").unwrap_err();

        assert!(
            error.to_string().contains("missing field `dateTime`"),
            "got {error}"
        );
    }

    #[test]
    fn serializes_with_camel_case_names() {
        let value = serde_json::to_value(coffee_transaction()).unwrap();

        assert_eq!(value["dateTime"], "2023-01-01T00:00:00Z");
        assert_eq!(value["centsAmount"], 1999);
        assert_eq!(value["merchantCountryName"], "United States");
    }

    #[track_caller]
    fn assert_invalid_field(result: Result<(), Error>, field: &str) {
        match result {
            Err(Error::InvalidTransaction(message)) => assert!(
                message.contains(field),
                "'{message}' does not mention the field '{field}'"
            ),
            other => panic!("want InvalidTransaction error for {field}, got {other:?}"),
        }
    }
}
