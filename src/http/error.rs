use crate::service::checkout_service::CheckoutError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorPayload,
}

#[derive(Debug, Serialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

pub fn error_response(status: StatusCode, code: &str, message: &str) -> Response {
    (
        status,
        Json(ErrorEnvelope {
            error: ErrorPayload {
                code: code.to_string(),
                message: message.to_string(),
                details: None,
            },
        }),
    )
        .into_response()
}

pub fn not_found(what: &str) -> Response {
    error_response(StatusCode::NOT_FOUND, "NOT_FOUND", &format!("{what} not found"))
}

/// Repository failures reaching a handler directly. Validation and integrity
/// problems still get their own status codes.
pub fn repo_error(e: anyhow::Error) -> Response {
    CheckoutError::from(e).into_response()
}

impl IntoResponse for CheckoutError {
    fn into_response(self) -> Response {
        match &self {
            CheckoutError::Validation(v) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, "VALIDATION_FAILED", &v.to_string())
            }
            CheckoutError::NotFound(what) => not_found(what),
            CheckoutError::Integrity(detail) => {
                tracing::warn!(error = %detail, "integrity violation");
                error_response(
                    StatusCode::CONFLICT,
                    "INTEGRITY_VIOLATION",
                    "referenced record is missing or still in use",
                )
            }
            CheckoutError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", &e.to_string())
            }
        }
    }
}
