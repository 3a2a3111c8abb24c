use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new().route("/enrollment", get(get_enrollment).post(set_enrollment))
}

/// Current gate state; the first read creates it open.
pub async fn get_enrollment(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.enrollment_status().await {
        Ok(e) => (StatusCode::OK, Json(serde_json::json!({ "enabled": e.enabled }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn set_enrollment(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::SetEnrollmentRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return errors::json_error(StatusCode::BAD_REQUEST, "validation_error", e.body_text()),
    };

    match services.set_enrollment(body.enabled).await {
        Ok(e) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Enrollment status updated",
                "enabled": e.enabled,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
