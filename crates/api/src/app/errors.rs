use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use serde::Serialize;
use serde_json::json;

use ember_core::{CommandError, Rejection, ValidationResult};

pub const VALIDATION_PROBLEM_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.5.1";
pub const VALIDATION_PROBLEM_TITLE: &str = "One or more validation errors occurred.";

pub fn rejection_to_response(rejection: Rejection) -> axum::response::Response {
    match rejection {
        Rejection::BadRequest(msg) => json_error(StatusCode::BAD_REQUEST, "bad_request", msg),
        Rejection::ValidationFailed(result) => validation_problem(result),
    }
}

pub fn command_error_to_response(err: CommandError) -> axum::response::Response {
    match err {
        CommandError::Downstream(e) => {
            tracing::error!("command failed downstream: {e}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "downstream_failure", e.to_string())
        }
        CommandError::Cancelled => {
            tracing::warn!("command cancelled before completion");
            json_error(StatusCode::SERVICE_UNAVAILABLE, "cancelled", "request was cancelled")
        }
    }
}

/// `400` problem document carrying the field → messages map.
pub fn validation_problem(result: ValidationResult) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        [(header::CONTENT_TYPE, "application/problem+json")],
        axum::Json(json!({
            "type": VALIDATION_PROBLEM_TYPE,
            "title": VALIDATION_PROBLEM_TITLE,
            "status": StatusCode::BAD_REQUEST.as_u16(),
            "errors": result,
        })),
    )
        .into_response()
}

/// `201 Created` with a `Location` header and the new id as body.
pub fn created(location: String, id: impl Serialize) -> axum::response::Response {
    (StatusCode::CREATED, [(header::LOCATION, location)], axum::Json(id)).into_response()
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
