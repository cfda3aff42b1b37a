use serde_json::{Value, json};
use time::macros::datetime;

use crate::transaction::Transaction;

/// A valid transaction for a cup of coffee.
pub fn coffee_transaction() -> Transaction {
    Transaction {
        date_time: datetime!(2023-01-01 0:00 UTC),
        cents_amount: 1999,
        currency_code: "USD".to_owned(),
        reference: "abc123".to_owned(),
        merchant_name: "Coffee Shop".to_owned(),
        merchant_city: "Seattle".to_owned(),
        merchant_country_code: "US".to_owned(),
        merchant_country_name: "United States".to_owned(),
        merchant_category_code: "5812".to_owned(),
        merchant_category_name: "Restaurants".to_owned(),
    }
}

/// The JSON payload a client would send for [coffee_transaction].
pub fn coffee_transaction_json() -> Value {
    json!({
        "dateTime": "2023-01-01T00:00:00Z",
        "centsAmount": 1999,
        "currencyCode": "USD",
        "reference": "abc123",
        "merchantName": "Coffee Shop",
        "merchantCity": "Seattle",
        "merchantCountryCode": "US",
        "merchantCountryName": "United States",
        "merchantCategoryCode": "5812",
        "merchantCategoryName": "Restaurants"
    })
}
