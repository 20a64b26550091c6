use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Server-side variants carry internal detail for the log only; the client
/// always receives a fixed message per kind.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),

    #[error("Upstream returned an unusable response: {0}")]
    UpstreamFormat(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),

    #[error("Not implemented")]
    NotImplemented,
}

impl AppError {
    /// Status and stable error code for this kind.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            AppError::InvalidImage(_) => (StatusCode::BAD_REQUEST, "INVALID_IMAGE"),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE"),
            AppError::UpstreamUnavailable(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_UNAVAILABLE"),
            AppError::UpstreamTimeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            AppError::UpstreamFormat(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_FORMAT"),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            AppError::NotImplemented => (StatusCode::NOT_IMPLEMENTED, "NOT_IMPLEMENTED"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidImage(msg) => {
                tracing::debug!("Rejected upload: {msg}");
                "The uploaded file could not be decoded as an image".to_string()
            }
            AppError::PayloadTooLarge(msg) => {
                tracing::debug!("Rejected upload: {msg}");
                "The uploaded file exceeds the configured size limit".to_string()
            }
            AppError::UpstreamUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {msg}");
                "An upstream AI service is unavailable".to_string()
            }
            AppError::UpstreamTimeout(msg) => {
                tracing::error!("Upstream timeout: {msg}");
                "An upstream AI service did not respond in time".to_string()
            }
            AppError::UpstreamFormat(msg) => {
                tracing::error!("Upstream format error: {msg}");
                "An upstream AI service returned an unusable response".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::NotImplemented => "This capability is not yet implemented".to_string(),
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::Timeout(_) => AppError::UpstreamTimeout(err.to_string()),
            LlmError::Http(_) | LlmError::Api { .. } => {
                AppError::UpstreamUnavailable(err.to_string())
            }
            LlmError::Parse(_) | LlmError::EmptyContent => AppError::UpstreamFormat(err.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(err.to_string())
        } else {
            AppError::Validation(format!("Malformed multipart body: {err}"))
        }
    }
}
