use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use ember_core::{CommandHandler, CommandResult, UserId, until_cancelled};

use crate::repository::UserRepository;
use crate::user::{CreateUser, new_user};

/// Creates a user from a validated [`CreateUser`] command.
#[derive(Clone)]
pub struct CreateUserHandler {
    repository: Arc<dyn UserRepository>,
}

impl CreateUserHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<CreateUser> for CreateUserHandler {
    type Output = UserId;

    async fn handle(
        &self,
        command: CreateUser,
        cancel: &CancellationToken,
    ) -> CommandResult<UserId> {
        let user = new_user(command);
        let created = until_cancelled(cancel, self.repository.create(user, cancel)).await?;
        tracing::info!(user_id = %created.id, "user created");
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, UnimplementedUserRepository};
    use ember_core::{CommandError, RepositoryError};

    #[tokio::test]
    async fn returns_id_of_created_user() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(repo.clone());

        let id = handler
            .handle(CreateUser::new("ada"), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(id, UserId::new(1));
        assert_eq!(repo.get(id).unwrap().user_name, "ada");
    }

    #[tokio::test]
    async fn repository_failure_propagates_unchanged() {
        let handler = CreateUserHandler::new(Arc::new(UnimplementedUserRepository));
        let err = handler
            .handle(CreateUser::new("ada"), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::Downstream(RepositoryError::NotImplemented("UserRepository::create"))
        );
    }

    #[tokio::test]
    async fn cancelled_request_creates_nothing() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = CreateUserHandler::new(repo.clone());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let err = handler.handle(CreateUser::new("ada"), &cancel).await.unwrap_err();

        assert_eq!(err, CommandError::Cancelled);
        assert!(repo.is_empty());
    }
}
