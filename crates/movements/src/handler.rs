use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

use ember_core::{CommandHandler, CommandResult, MovementId, until_cancelled};

use crate::movement::{CreateMovement, new_movement};
use crate::repository::MovementRepository;

/// Books a movement from a validated [`CreateMovement`] command.
#[derive(Clone)]
pub struct CreateMovementHandler {
    repository: Arc<dyn MovementRepository>,
}

impl CreateMovementHandler {
    pub fn new(repository: Arc<dyn MovementRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CommandHandler<CreateMovement> for CreateMovementHandler {
    type Output = MovementId;

    async fn handle(
        &self,
        command: CreateMovement,
        cancel: &CancellationToken,
    ) -> CommandResult<MovementId> {
        let movement = new_movement(command, Utc::now());
        let created = until_cancelled(cancel, self.repository.create(movement, cancel)).await?;
        tracing::info!(movement_id = %created.id, amount = %created.amount, "movement created");
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::{DEFAULT_ACCOUNT, Movement, NewMovement};
    use crate::repository::{InMemoryMovementRepository, UnimplementedMovementRepository};
    use ember_core::{CommandError, RepositoryError};
    use rust_decimal::Decimal;
    use std::time::Duration;

    /// Repository that never answers.
    struct StalledRepository;

    #[async_trait]
    impl MovementRepository for StalledRepository {
        async fn create(
            &self,
            _movement: NewMovement,
            _cancel: &CancellationToken,
        ) -> Result<Movement, RepositoryError> {
            std::future::pending().await
        }
    }

    #[tokio::test]
    async fn creates_movement_with_requested_amount() {
        let repo = Arc::new(InMemoryMovementRepository::new());
        let handler = CreateMovementHandler::new(repo.clone());

        let id = handler
            .handle(CreateMovement::new(Decimal::new(50, 2)), &CancellationToken::new())
            .await
            .unwrap();

        let stored = repo.get(id).unwrap();
        assert_eq!(stored.amount, Decimal::new(50, 2));
        assert_eq!(stored.account, DEFAULT_ACCOUNT);
    }

    #[tokio::test]
    async fn unimplemented_store_is_a_downstream_failure() {
        let handler = CreateMovementHandler::new(Arc::new(UnimplementedMovementRepository));
        let err = handler
            .handle(CreateMovement::new(Decimal::ONE), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            CommandError::Downstream(RepositoryError::NotImplemented("MovementRepository::create"))
        );
    }

    #[tokio::test]
    async fn cancellation_before_repository_answers_yields_cancelled() {
        let handler = CreateMovementHandler::new(Arc::new(StalledRepository));
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            trigger.cancel();
        });

        let out = handler.handle(CreateMovement::new(Decimal::ONE), &cancel).await;

        assert_eq!(out, Err(CommandError::Cancelled));
    }
}
