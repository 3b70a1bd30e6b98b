//! Command handler abstraction and cancellation helper.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::{CommandError, CommandResult, RepositoryError};

/// Performs the action requested by a (validated) command.
///
/// Handlers only see commands the gate has already accepted. The returned
/// error propagates to the caller without being rewritten.
#[async_trait]
pub trait CommandHandler<C>: Send + Sync
where
    C: Send + 'static,
{
    type Output: Send;

    async fn handle(&self, command: C, cancel: &CancellationToken) -> CommandResult<Self::Output>;
}

/// Await a repository call unless `cancel` fires first.
///
/// An already-cancelled token wins without polling `op`, so no side effect is
/// started after cancellation was requested.
pub async fn until_cancelled<T, F>(cancel: &CancellationToken, op: F) -> CommandResult<T>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(CommandError::Cancelled),
        res = op => res.map_err(CommandError::from),
    }
}
