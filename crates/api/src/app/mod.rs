//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: contact service + store/pool wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: request DTOs and their validation
//! - `errors.rs`: consistent plain-text error responses

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over already-built services.
pub fn build_app(services: Arc<services::AppServices>) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(middleware::request_logging))
            .layer(Extension(services)),
    )
}
