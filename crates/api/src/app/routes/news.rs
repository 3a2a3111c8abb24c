use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

const INVALID_NEWS_ID: &str = "Invalid news ID";

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_news).post(create_news))
        .route("/:id", put(replace_news).patch(patch_news).delete(delete_news))
}

fn bad_body(rejection: JsonRejection) -> axum::response::Response {
    errors::json_error(StatusCode::BAD_REQUEST, "validation_error", rejection.body_text())
}

pub async fn list_news(Extension(services): Extension<Arc<AppServices>>) -> axum::response::Response {
    match services.list_news().await {
        Ok(items) => {
            let items = items.into_iter().map(dto::news_to_json).collect::<Vec<_>>();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_news(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::NewsRequest>, JsonRejection>,
) -> axum::response::Response {
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return bad_body(e),
    };

    match services.create_news(body.text, body.url).await {
        Ok(n) => (StatusCode::CREATED, Json(dto::news_to_json(n))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Full replace of `text` and `url`; both are required.
pub async fn replace_news(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::NewsRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_document_id(&id, INVALID_NEWS_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return bad_body(e),
    };

    match services.replace_news(id, body.text, body.url).await {
        Ok(n) => (StatusCode::OK, Json(dto::news_to_json(n))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn patch_news(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<dto::PatchNewsRequest>, JsonRejection>,
) -> axum::response::Response {
    let id = match errors::parse_document_id(&id, INVALID_NEWS_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let Json(body) = match body {
        Ok(b) => b,
        Err(e) => return bad_body(e),
    };

    match services.patch_news(id, body.into()).await {
        Ok(n) => (StatusCode::OK, Json(dto::news_to_json(n))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_news(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id = match errors::parse_document_id(&id, INVALID_NEWS_ID) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    match services.delete_news(id).await {
        Ok(n) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "News deleted",
                "deletedNews": dto::news_to_json(n),
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
