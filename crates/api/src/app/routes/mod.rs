use axum::{routing::get, Router};

pub mod contacts;
pub mod system;

/// Router for all endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .merge(contacts::router())
}
