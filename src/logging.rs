//! Middleware for logging requests and responses.

use axum::{
    body::{Body, to_bytes},
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

/// The number of bytes of a request or response body to log at the `info` level.
const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// The largest request body the server will buffer, in bytes.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If the body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
///
/// Request bodies larger than [MAX_BODY_BYTES] are rejected with
/// `413 Payload Too Large` before reaching the route handler.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let body_bytes = match to_bytes(body, MAX_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::warn!(
                "could not read request body within {MAX_BODY_BYTES} bytes: {error}"
            );
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body is too large").into_response();
        }
    };

    log_body(
        &format!("Received request: {} {}", parts.method, parts.uri),
        &String::from_utf8_lossy(&body_bytes),
    );

    let request = Request::from_parts(parts, Body::from(body_bytes));
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_bytes = match to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    log_body(
        &format!("Sending response: {}", parts.status),
        &String::from_utf8_lossy(&body_bytes),
    );

    Response::from_parts(parts, Body::from(body_bytes))
}

fn log_body(summary: &str, body: &str) {
    let truncated = truncate_body(body, LOG_BODY_LENGTH_LIMIT);

    if truncated.len() < body.len() {
        tracing::info!("{summary}\nbody: {truncated}...");
        tracing::debug!("Full body: {body:?}");
    } else {
        tracing::info!("{summary}\nbody: {body:?}");
    }
}

/// Shorten `body` to at most `limit` bytes without splitting a character.
fn truncate_body(body: &str, limit: usize) -> &str {
    if body.len() <= limit {
        return body;
    }

    let mut end = limit;
    while !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}

#[cfg(test)]
mod tests {
    use super::truncate_body;

    #[test]
    fn short_body_is_unchanged() {
        assert_eq!(truncate_body("hi!", 64), "hi!");
    }

    #[test]
    fn long_body_is_cut_at_limit() {
        let body = "a".repeat(100);

        assert_eq!(truncate_body(&body, 64).len(), 64);
    }

    #[test]
    fn truncation_does_not_split_characters() {
        // Each 'é' is two bytes, so byte 5 falls inside the third character.
        let body = "ééééé";

        assert_eq!(truncate_body(body, 5), "éé");
    }
}
