//! Defines the endpoint for recording a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    body::Bytes,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{Transaction, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for recording a new transaction.
///
/// Responds with an empty body on success, a JSON error object if the body is
/// not a complete transaction, or an internal server error if the transaction
/// could not be saved.
///
/// The body is decoded as JSON regardless of the request's `Content-Type`.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    body: Bytes,
) -> Response {
    let transaction = match Json::<Transaction>::from_bytes(&body) {
        Ok(Json(transaction)) => transaction,
        Err(rejection) => {
            tracing::warn!("could not decode transaction: {}", rejection.body_text());
            return Error::InvalidTransaction(rejection.body_text()).into_response();
        }
    };

    if let Err(error) = transaction.validate() {
        tracing::warn!("rejected transaction: {error}");
        return error.into_response();
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(_) => return Error::DatabaseLockError.into_response(),
    };

    if let Err(error) = create_transaction(&transaction, &connection) {
        return error.into_response();
    }

    StatusCode::OK.into_response()
}
