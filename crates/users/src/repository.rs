//! User persistence boundary.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use ember_core::{Entity, RepositoryError, UserId};

use crate::user::{NewUser, User};

/// Persistence contract for users.
///
/// Storage semantics beyond "create returns the stored record with its id"
/// (uniqueness, idempotency, retries) are left to the backend.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(
        &self,
        user: NewUser,
        cancel: &CancellationToken,
    ) -> Result<User, RepositoryError>;
}

#[async_trait]
impl<R> UserRepository for Arc<R>
where
    R: UserRepository + ?Sized,
{
    async fn create(
        &self,
        user: NewUser,
        cancel: &CancellationToken,
    ) -> Result<User, RepositoryError> {
        (**self).create(user, cancel).await
    }
}

/// Backend with no storage behind it; every call fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnimplementedUserRepository;

#[async_trait]
impl UserRepository for UnimplementedUserRepository {
    async fn create(
        &self,
        _user: NewUser,
        _cancel: &CancellationToken,
    ) -> Result<User, RepositoryError> {
        Err(RepositoryError::NotImplemented("UserRepository::create"))
    }
}

/// In-memory user store for tests/dev. Ids start at 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    inner: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: UserId) -> Option<User> {
        let users = self.inner.read().ok()?;
        users.iter().find(|u| u.id() == id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|u| u.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(
        &self,
        user: NewUser,
        _cancel: &CancellationToken,
    ) -> Result<User, RepositoryError> {
        let mut users = self
            .inner
            .write()
            .map_err(|_| RepositoryError::storage("user store lock poisoned"))?;

        let id = UserId::new(users.len() as i64 + 1);
        let user = User::from_new(id, user);
        users.push(user.clone());

        tracing::debug!(user_id = %id, "user stored");
        Ok(user)
    }
}
