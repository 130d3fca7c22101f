//! Error types and Axum response conversions.

use crate::storage::account::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application error types.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Internal(msg) => {
                // Log detailed error server-side, return generic message to client
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            AppError::StorageUnavailable(msg) => {
                // Same discipline: the cause goes to the log, not the client
                tracing::error!(error = %msg, "Storage unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage unavailable".to_string(),
                )
            }
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::EmailTaken => AppError::Conflict("Email already registered".to_string()),
            StoreError::UnknownAccount => AppError::NotFound("Account not found".to_string()),
            StoreError::Credential(e) => AppError::Internal(format!("Credential error: {}", e)),
            StoreError::Unavailable(e) => AppError::StorageUnavailable(format!("IO error: {}", e)),
            StoreError::Encoding(e) => AppError::StorageUnavailable(format!("JSON error: {}", e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    /// Extract status code and JSON body from an AppError response.
    async fn error_response(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        (status, json)
    }

    #[tokio::test]
    async fn test_internal_hides_details() {
        // CRITICAL: Internal error must NOT leak detailed message to client
        let (status, body) = error_response(AppError::Internal(
            "Token signing failed with key at /etc/doorman/secret".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal server error");
        assert!(!body["error"].as_str().unwrap().contains("/etc/doorman"));
    }

    #[tokio::test]
    async fn test_storage_unavailable_hides_details() {
        let (status, body) = error_response(AppError::StorageUnavailable(
            "IO error: permission denied writing /var/lib/doorman/users.json".to_string(),
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Storage unavailable");
        assert!(!body["error"].as_str().unwrap().contains("users.json"));
        assert!(!body["error"].as_str().unwrap().contains("/var/lib"));
    }

    #[tokio::test]
    async fn test_bad_request() {
        let (status, body) =
            error_response(AppError::BadRequest("email and password required".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "email and password required");
    }

    #[tokio::test]
    async fn test_unauthorized() {
        let (status, body) =
            error_response(AppError::Unauthorized("Invalid email or password".to_string())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Invalid email or password");
    }

    #[tokio::test]
    async fn test_conflict() {
        let (status, body) =
            error_response(AppError::Conflict("Email already registered".to_string())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Email already registered");
    }

    #[tokio::test]
    async fn test_not_found() {
        let (status, body) =
            error_response(AppError::NotFound("Account not found".to_string())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Account not found");
    }

    #[test]
    fn test_from_store_error_conflict() {
        let app_err = AppError::from(StoreError::EmailTaken);
        assert!(matches!(app_err, AppError::Conflict(_)));
    }

    #[test]
    fn test_from_store_error_not_found() {
        let app_err = AppError::from(StoreError::UnknownAccount);
        assert!(matches!(app_err, AppError::NotFound(_)));
    }

    #[test]
    fn test_from_store_error_unavailable() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let app_err = AppError::from(StoreError::Unavailable(io_err));
        match app_err {
            AppError::StorageUnavailable(msg) => assert!(msg.contains("IO error")),
            _ => panic!("Expected StorageUnavailable variant"),
        }
    }
}
