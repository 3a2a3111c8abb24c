//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring and the per-route operations
//! - `routes/`: HTTP routes + handlers (one file per collection)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::{path::Path, sync::Arc};

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the tests).
///
/// Anything not matched by `/health` or `/api/...` is looked up in `static_dir`.
pub fn build_app(services: services::AppServices, static_dir: impl AsRef<Path>) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api", routes::router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(Extension(services)),
        )
}
