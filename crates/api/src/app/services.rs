//! Composition root: every validator, repository, handler and gate is built
//! here once and shared by reference with the routes.

use std::sync::Arc;

use ember_core::{
    CommandHandler, MovementId, RegistryError, UserId, ValidationGate, ValidatorRegistry,
};
use ember_movements::{
    CreateMovement, CreateMovementHandler, CreateMovementValidator, InMemoryMovementRepository,
    MovementRepository, UnimplementedMovementRepository,
};
use ember_users::{
    CreateUser, CreateUserHandler, CreateUserValidator, InMemoryUserRepository,
    UnimplementedUserRepository, UserRepository,
};

use crate::config::StoreBackend;

/// Shared handle to a command handler.
pub type DynHandler<C, O> = Arc<dyn CommandHandler<C, Output = O>>;

pub struct AppServices {
    pub create_user_gate: ValidationGate<CreateUser>,
    pub create_user: DynHandler<CreateUser, UserId>,
    pub create_movement_gate: ValidationGate<CreateMovement>,
    pub create_movement: DynHandler<CreateMovement, MovementId>,
}

/// Validators for every command the API accepts.
pub fn validator_registry() -> ValidatorRegistry {
    let mut registry = ValidatorRegistry::new();
    registry
        .register::<CreateUser>(Arc::new(CreateUserValidator::new()))
        .register::<CreateMovement>(Arc::new(CreateMovementValidator::new()));
    registry
}

impl AppServices {
    /// Wire gates from `validators` in front of the given handlers.
    pub fn new(
        validators: &ValidatorRegistry,
        create_user: DynHandler<CreateUser, UserId>,
        create_movement: DynHandler<CreateMovement, MovementId>,
    ) -> Result<Self, RegistryError> {
        Ok(Self {
            create_user_gate: ValidationGate::from_registry(validators)?,
            create_user,
            create_movement_gate: ValidationGate::from_registry(validators)?,
            create_movement,
        })
    }

    pub fn with_repositories(
        users: Arc<dyn UserRepository>,
        movements: Arc<dyn MovementRepository>,
    ) -> Result<Self, RegistryError> {
        Self::new(
            &validator_registry(),
            Arc::new(CreateUserHandler::new(users)),
            Arc::new(CreateMovementHandler::new(movements)),
        )
    }
}

pub fn build_services(store: StoreBackend) -> Result<AppServices, RegistryError> {
    tracing::info!(?store, "wiring services");
    match store {
        StoreBackend::InMemory => AppServices::with_repositories(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryMovementRepository::new()),
        ),
        StoreBackend::Unimplemented => AppServices::with_repositories(
            Arc::new(UnimplementedUserRepository),
            Arc::new(UnimplementedMovementRepository),
        ),
    }
}
