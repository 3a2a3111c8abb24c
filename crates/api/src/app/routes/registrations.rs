use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Path},
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use enrollhub_core::RegistrationFields;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/registrations", get(list_registrations))
        .route("/registrations/:id", delete(delete_registration))
        .route("/register", post(register))
}

pub async fn list_registrations(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.list_registrations().await {
        Ok(items) => {
            let items = items
                .into_iter()
                .map(dto::registration_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Accepts any registration-shaped object, including an empty body.
///
/// Only JSON bodies are read; any other content type registers an empty form.
pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let fields = if is_json(&headers) {
        match RegistrationFields::from_json_body(&body) {
            Ok(f) => f,
            Err(e) => return errors::service_error_to_response(e.into()),
        }
    } else {
        RegistrationFields::default()
    };

    match services.register(fields).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Registration successful" })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
    else {
        return false;
    };
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

pub async fn delete_registration(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_document_id(&id, "Invalid registration ID") {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_registration(id).await {
        Ok(_) => (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Registration deleted successfully" })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
