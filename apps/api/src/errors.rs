use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant except `Internal` is a terminal, caller-correctable outcome:
/// no session state is mutated on any of these paths.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unknown role: {0}")]
    InvalidRole(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),

    #[error("Question '{got}' is not the expected next question ('{expected}')")]
    OutOfOrderQuestion { expected: String, got: String },

    #[error("Answer cannot be empty")]
    EmptyAnswer,

    #[error("All questions for this session have already been answered")]
    AlreadyComplete,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidRole(role) => (
                StatusCode::NOT_FOUND,
                "INVALID_ROLE",
                format!("Role '{role}' is not a known role identifier"),
            ),
            AppError::UnknownSession(msg) => {
                (StatusCode::NOT_FOUND, "UNKNOWN_SESSION", msg.clone())
            }
            AppError::OutOfOrderQuestion { expected, got } => (
                StatusCode::CONFLICT,
                "OUT_OF_ORDER_QUESTION",
                format!("Expected question '{expected}' next, got '{got}'"),
            ),
            AppError::EmptyAnswer => (
                StatusCode::BAD_REQUEST,
                "EMPTY_ANSWER",
                "Answer cannot be empty".to_string(),
            ),
            AppError::AlreadyComplete => (
                StatusCode::CONFLICT,
                "ALREADY_COMPLETE",
                "All questions for this session have already been answered".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
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
