//! "Create movement" feature slice.
//!
//! A movement is an amount booked against the bank account. This crate holds
//! its contract, validation rules, handler and repository contract.

pub mod handler;
pub mod movement;
pub mod repository;

pub use handler::CreateMovementHandler;
pub use movement::{
    CreateMovement, CreateMovementValidator, DEFAULT_ACCOUNT, Movement, NewMovement, new_movement,
};
pub use repository::{
    InMemoryMovementRepository, MovementRepository, UnimplementedMovementRepository,
};
