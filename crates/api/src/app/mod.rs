//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: composition root (validators, repositories, handlers, gates)
//! - `routes/`: HTTP routes + handlers (one file per feature)
//! - `errors.rs`: consistent error and success responses

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use ember_core::RegistryError;

use crate::config::ApiConfig;
use crate::middleware;

pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(config: &ApiConfig) -> Result<Router, RegistryError> {
    let services = services::build_services(config.store)?;
    Ok(router(Arc::new(services), config.request_timeout))
}

/// Router over already-wired services.
pub fn router(services: Arc<services::AppServices>, request_timeout: Duration) -> Router {
    let state = middleware::RequestContextState { request_timeout };

    Router::new()
        .route("/health", get(routes::system::health))
        .nest("/app", routes::router())
        .layer(Extension(services))
        .layer(
            ServiceBuilder::new().layer(axum::middleware::from_fn_with_state(
                state,
                middleware::request_context,
            )),
        )
}
