use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use enrollhub_core::{DocumentId, DomainError};

use crate::app::services::ServiceError;

/// Client-facing text for every internal failure; details only go to the log.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(DomainError::Validation(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        ServiceError::Domain(DomainError::InvalidId(msg)) => {
            json_error(StatusCode::BAD_REQUEST, "invalid_id", msg)
        }
        ServiceError::NotFound(msg) => json_error(StatusCode::NOT_FOUND, "not_found", msg),
        ServiceError::EnrollmentClosed => json_error(
            StatusCode::FORBIDDEN,
            "enrollment_closed",
            "Enrollment is currently closed.",
        ),
        ServiceError::Store(e) => {
            tracing::error!(error = %e, "store operation failed");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                INTERNAL_ERROR_MESSAGE,
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// Parse a path id, answering 400 with `message` when it is not a well-formed object id.
pub fn parse_document_id(
    raw: &str,
    message: &'static str,
) -> Result<DocumentId, axum::response::Response> {
    raw.parse()
        .map_err(|_| json_error(StatusCode::BAD_REQUEST, "invalid_id", message))
}
