//! `ember-core` — building blocks shared by every feature slice.
//!
//! This crate holds the request-validation pipeline (validators, the gate that
//! runs them before a handler, and the registry the composition root builds),
//! plus the error taxonomy and identifiers the feature crates share.

pub mod entity;
pub mod error;
pub mod gate;
pub mod handler;
pub mod id;
pub mod registry;
pub mod validation;

pub use entity::Entity;
pub use error::{CommandError, CommandResult, RepositoryError};
pub use gate::{Rejection, ValidationGate};
pub use handler::{CommandHandler, until_cancelled};
pub use id::{MovementId, UserId};
pub use registry::{RegistryError, ValidatorRegistry};
pub use validation::{RuleSet, ValidationResult, Validator};
