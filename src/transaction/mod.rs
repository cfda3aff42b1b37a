//! Transaction recording and retrieval.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and its presence validation
//! - Database functions for storing and listing transactions
//! - Route handlers for the JSON API

mod core;
mod create_endpoint;
mod list_endpoint;

#[cfg(test)]
mod test_utils;

pub use core::{
    Transaction, count_transactions, create_transaction, create_transaction_table,
    get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use list_endpoint::list_transactions_endpoint;
