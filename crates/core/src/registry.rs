//! Validator registry: command type → validator, built once at start-up.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use crate::validation::Validator;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no validator registered for {0}")]
    MissingValidator(&'static str),
}

/// Explicit mapping from command type to its validator.
///
/// The composition root registers one validator per command and hands the
/// registry to each gate's constructor. Lookups never scan types; they only
/// read what was registered.
#[derive(Default)]
pub struct ValidatorRegistry {
    validators: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl ValidatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the validator for `C`, replacing any earlier registration.
    pub fn register<C: 'static>(&mut self, validator: Arc<dyn Validator<C>>) -> &mut Self {
        tracing::debug!(command = type_name::<C>(), "validator registered");
        self.validators.insert(TypeId::of::<C>(), Box::new(validator));
        self
    }

    pub fn get<C: 'static>(&self) -> Option<Arc<dyn Validator<C>>> {
        self.validators
            .get(&TypeId::of::<C>())
            .and_then(|v| v.downcast_ref::<Arc<dyn Validator<C>>>())
            .cloned()
    }

    pub fn require<C: 'static>(&self) -> Result<Arc<dyn Validator<C>>, RegistryError> {
        self.get::<C>()
            .ok_or(RegistryError::MissingValidator(type_name::<C>()))
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }
}

impl core::fmt::Debug for ValidatorRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ValidatorRegistry")
            .field("registered", &self.validators.len())
            .finish()
    }
}
