use axum::Router;

pub mod enrollment;
pub mod news;
pub mod registrations;
pub mod system;

/// Router for everything under `/api`.
pub fn router() -> Router {
    Router::new()
        .merge(enrollment::router())
        .merge(registrations::router())
        .nest("/news", news::router())
}
