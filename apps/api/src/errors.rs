use std::sync::OnceLock;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::saju::SajuError;

/// Set once at startup from `Config`. Detail messages on 500s are attached
/// only in development, mirroring the original handler's NODE_ENV check.
static DEVELOPMENT: OnceLock<bool> = OnceLock::new();

pub fn set_development(enabled: bool) {
    let _ = DEVELOPMENT.set(enabled);
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every failure crosses this single boundary and becomes an HTTP error
/// response; nothing is retried or recovered past it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Calendar error: {0}")]
    Saju(#[from] SajuError),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    fn into_response_with(self, development: bool) -> Response {
        let (status, error, detail) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            AppError::Saju(e) => (StatusCode::BAD_REQUEST, e.to_string(), None),
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                    Some(e.to_string()),
                )
            }
        };

        let body = match detail.filter(|_| development) {
            Some(message) => json!({ "error": error, "message": message }),
            None => json!({ "error": error }),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(*DEVELOPMENT.get().unwrap_or(&false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json_with(
        err: AppError,
        development: bool,
    ) -> (StatusCode, serde_json::Value) {
        let response = err.into_response_with(development);
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        body_json_with(err, false).await
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let (status, body) =
            body_json(AppError::Validation("Missing required fields".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let (status, body) = body_json(AppError::NotFound("Invalid test type".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Invalid test type");
    }

    #[tokio::test]
    async fn test_llm_error_is_opaque_500() {
        let (status, body) = body_json(AppError::Llm("upstream exploded".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Internal Server Error");
        assert!(body.get("message").is_none());
    }

    #[tokio::test]
    async fn test_development_attaches_detail_message() {
        let (status, body) =
            body_json_with(AppError::Llm("upstream exploded".into()), true).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "upstream exploded");
    }
}
