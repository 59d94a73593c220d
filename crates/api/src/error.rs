//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use costwise_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// Renders an `AppError` as `{ "error": CODE, "message": ... }`.
///
/// Server-side failures hide their message.
pub fn error_response(err: &AppError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let message = if err.is_client_error() {
        err.to_string()
    } else {
        "An error occurred".to_string()
    };

    (
        status,
        Json(json!({
            "error": err.error_code(),
            "message": message
        })),
    )
        .into_response()
}

/// Logs a failed operation and renders it.
pub fn failure(action: &str, err: impl Into<AppError>) -> Response {
    let err = err.into();
    if err.is_client_error() {
        warn!(error = %err, "Failed to {action}");
    } else {
        error!(error = %err, "Failed to {action}");
    }
    error_response(&err)
}

/// A 400 response for a malformed query parameter.
pub fn bad_request(message: impl std::fmt::Display) -> Response {
    error_response(&AppError::Validation(message.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_client_error_keeps_message() {
        let response = error_response(&AppError::Conflict("budget revised".to_string()));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "CONFLICT");
        assert_eq!(value["message"], "Conflict: budget revised");
    }

    #[tokio::test]
    async fn test_server_error_hides_message() {
        let response = error_response(&AppError::Database("connection refused".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "DATABASE_ERROR");
        assert_eq!(value["message"], "An error occurred");
    }
}
