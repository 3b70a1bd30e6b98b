use axum::Router;

pub mod movements;
pub mod system;
pub mod users;

/// Router for the feature endpoints (mounted under `/app`).
pub fn router() -> Router {
    Router::new()
        .merge(users::router())
        .merge(movements::router())
}
