use std::time::Duration;

use axum::{
    extract::State,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};
use tracing::Instrument;

use crate::context::RequestContext;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone)]
pub struct RequestContextState {
    pub request_timeout: Duration,
}

/// Attach a [`RequestContext`] to the request and run it inside a span.
///
/// The context's cancellation token fires when `request_timeout` elapses (the
/// handler then winds down and answers) or when this future is dropped because
/// the client went away.
pub async fn request_context(
    State(state): State<RequestContextState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let ctx = RequestContext::new();
    let span = tracing::info_span!(
        "request",
        request_id = %ctx.request_id(),
        method = %req.method(),
        path = %req.uri().path(),
    );
    req.extensions_mut().insert(ctx.clone());

    async move {
        let cancel = ctx.cancel().clone();
        let guard = cancel.clone().drop_guard();

        let run = next.run(req);
        tokio::pin!(run);
        let mut response = tokio::select! {
            res = &mut run => res,
            _ = tokio::time::sleep(state.request_timeout) => {
                tracing::warn!(
                    timeout_ms = state.request_timeout.as_millis() as u64,
                    "request timed out; cancelling"
                );
                cancel.cancel();
                run.await
            }
        };
        guard.disarm();

        if let Ok(value) = HeaderValue::from_str(&ctx.request_id().to_string()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        tracing::info!(status = response.status().as_u16(), "request completed");
        response
    }
    .instrument(span)
    .await
}
