//! Error model for the command side.
//!
//! Request rejections (bad request, validation failure) live in [`crate::gate`]
//! because they never reach a handler. Everything here is what a handler can
//! return once the gate has let a command through.

use thiserror::Error;

/// Result type returned by command handlers.
pub type CommandResult<T> = Result<T, CommandError>;

/// Failure reported by a repository backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// The backing store has no implementation for this operation.
    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    /// The backing store failed while completing the operation.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl RepositoryError {
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }
}

/// Handler-level error.
///
/// Both variants propagate unchanged to the HTTP boundary, which maps them to a
/// server error response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The repository could not complete the operation.
    #[error("downstream failure: {0}")]
    Downstream(#[from] RepositoryError),

    /// The caller cancelled before the operation completed.
    #[error("operation cancelled")]
    Cancelled,
}

impl CommandError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
