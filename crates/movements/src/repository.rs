//! Movement persistence boundary.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use ember_core::{Entity, MovementId, RepositoryError};

use crate::movement::{Movement, NewMovement};

/// Persistence contract for movements.
#[async_trait]
pub trait MovementRepository: Send + Sync {
    async fn create(
        &self,
        movement: NewMovement,
        cancel: &CancellationToken,
    ) -> Result<Movement, RepositoryError>;
}

#[async_trait]
impl<R> MovementRepository for Arc<R>
where
    R: MovementRepository + ?Sized,
{
    async fn create(
        &self,
        movement: NewMovement,
        cancel: &CancellationToken,
    ) -> Result<Movement, RepositoryError> {
        (**self).create(movement, cancel).await
    }
}

/// Backend with no storage behind it; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedMovementRepository;

#[async_trait]
impl MovementRepository for UnimplementedMovementRepository {
    async fn create(
        &self,
        _movement: NewMovement,
        _cancel: &CancellationToken,
    ) -> Result<Movement, RepositoryError> {
        Err(RepositoryError::NotImplemented("MovementRepository::create"))
    }
}

/// In-memory movement store for tests/dev. Ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryMovementRepository {
    inner: RwLock<Vec<Movement>>,
}

impl InMemoryMovementRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: MovementId) -> Option<Movement> {
        let movements = self.inner.read().ok()?;
        movements.iter().find(|m| m.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl MovementRepository for InMemoryMovementRepository {
    async fn create(
        &self,
        movement: NewMovement,
        _cancel: &CancellationToken,
    ) -> Result<Movement, RepositoryError> {
        let mut movements = self
            .inner
            .write()
            .map_err(|_| RepositoryError::storage("movement store lock poisoned"))?;

        let id = MovementId::new(movements.len() as i64 + 1);
        let movement = Movement::from_new(id, movement);
        movements.push(movement.clone());

        tracing::debug!(movement_id = %id, amount = %movement.amount, "movement stored");
        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn new_movement(cents: i64) -> NewMovement {
        NewMovement {
            account: crate::DEFAULT_ACCOUNT.to_string(),
            amount: Decimal::new(cents, 2),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn in_memory_keeps_created_movements() {
        let repo = InMemoryMovementRepository::new();
        let cancel = CancellationToken::new();
        assert!(repo.is_empty());

        let a = repo.create(new_movement(50), &cancel).await.unwrap();
        let b = repo.create(new_movement(1200), &cancel).await.unwrap();

        assert_eq!(a.id, MovementId::new(1));
        assert_eq!(b.id, MovementId::new(2));
        assert_eq!(repo.len(), 2);
        assert_eq!(repo.get(b.id).unwrap().amount, Decimal::new(1200, 2));
    }

    #[tokio::test]
    async fn unimplemented_backend_fails() {
        let err = UnimplementedMovementRepository
            .create(new_movement(50), &CancellationToken::new())
            .await
            .unwrap_err();
        assert_eq!(err, RepositoryError::NotImplemented("MovementRepository::create"));
    }
}
