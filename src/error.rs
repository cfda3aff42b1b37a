//! Defines the app level error type and its conversion to HTTP responses.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The message sent to clients when an error should not be shown to them.
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str =
    "An unexpected error occurred, check the server logs for more details.";

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request body could not be decoded into a transaction, or a
    /// required field was missing or empty.
    ///
    /// The message is intended to be shown to the client so they can fix
    /// their request.
    #[error("{0}")]
    InvalidTransaction(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        Error::SqlError(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::InvalidTransaction(message) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_SERVER_ERROR_MESSAGE,
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::to_bytes, http::StatusCode, response::IntoResponse};

    use super::{Error, INTERNAL_SERVER_ERROR_MESSAGE};

    #[tokio::test]
    async fn invalid_transaction_is_bad_request_with_json_body() {
        let response =
            Error::InvalidTransaction("missing field `reference`".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["error"], "missing field `reference`");
    }

    #[tokio::test]
    async fn sql_error_hides_details_from_client() {
        let response = Error::SqlError(rusqlite::Error::QueryReturnedNoRows).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(body, INTERNAL_SERVER_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn lock_error_is_internal_server_error() {
        let response = Error::DatabaseLockError.into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
