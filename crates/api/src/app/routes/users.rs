use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};

use ember_core::CommandHandler;
use ember_users::CreateUser;

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::RequestContext;

pub fn router() -> Router {
    Router::new().route("/users", post(create_user))
}

pub async fn create_user(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<RequestContext>,
    body: Result<Json<CreateUser>, JsonRejection>,
) -> axum::response::Response {
    let handler = services.create_user.clone();
    let outcome = services
        .create_user_gate
        .pass(body.map(|Json(cmd)| cmd), |cmd| async move {
            handler.handle(cmd, ctx.cancel()).await
        })
        .await;

    match outcome {
        Err(rejection) => errors::rejection_to_response(rejection),
        Ok(Err(e)) => errors::command_error_to_response(e),
        Ok(Ok(id)) => errors::created(format!("/app/users/{id}"), id),
    }
}
