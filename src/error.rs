use crate::llm::LlmError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Diagnostic returned when the LLM answer could not be read
pub const LLM_RESPONSE_DETAIL: &str = "Error parsing Yandex GPT response";

/// Request-level errors; every variant is an HTTP 500
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Error parsing Yandex GPT response")]
    LlmResponse(#[source] LlmError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MalformedResponse(_) => AppError::LlmResponse(err),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = self.to_string();
        tracing::error!(
            error = %crate::logging::redact_secrets(&format!("{self:?}")),
            "request failed"
        );
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": detail })),
        )
            .into_response()
    }
}
