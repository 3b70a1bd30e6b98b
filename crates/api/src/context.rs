use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Per-request context, inserted by [`crate::middleware::request_context`].
///
/// Every request owns its own token; nothing here is shared across requests.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: Uuid,
    cancel: CancellationToken,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: Uuid::now_v7(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Fired when the request times out or its future is dropped.
    pub fn cancel(&self) -> &CancellationToken {
        &self.cancel
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
