use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};

use ember_core::CommandHandler;
use ember_movements::CreateMovement;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/movements", post(create_movement))
}

pub async fn create_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<CreateMovement>, JsonRejection>,
) -> axum::response::Response {
    let handler = services.create_movement.clone();
    let outcome = services
        .create_movement_gate
        .pass(body.map(|Json(cmd)| cmd), |cmd| async move {
            handler.handle(cmd, ctx.cancel()).await
        })
        .await;

    match outcome {
        Err(rejection) => errors::rejection_to_response(rejection),
        Ok(Err(e)) => errors::command_error_to_response(e),
        Ok(Ok(id)) => errors::created(format!("/app/movements/{id}"), id),
    }
}
