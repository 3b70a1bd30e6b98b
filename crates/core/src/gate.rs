//! Pre-handler validation gate.
//!
//! The gate sits between request binding and the handler:
//!
//! ```text
//! bound command ──▶ ValidationGate::pass ──▶ Rejection::BadRequest       (nothing bound)
//!                                       ├─▶ Rejection::ValidationFailed  (validator said no)
//!                                       └─▶ next(command)                 (forwarded, result untouched)
//! ```
//!
//! A rejected request never reaches `next`; a forwarded request reaches it
//! exactly once.

use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;

use thiserror::Error;

use crate::registry::{RegistryError, ValidatorRegistry};
use crate::validation::{ValidationResult, Validator};

/// Why the gate refused to forward a request.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The command could not be bound from the request.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The command was bound but violates at least one declared rule.
    #[error("validation failed")]
    ValidationFailed(ValidationResult),
}

/// Validation gate for commands of type `C`.
pub struct ValidationGate<C> {
    validator: Arc<dyn Validator<C>>,
}

impl<C> Clone for ValidationGate<C> {
    fn clone(&self) -> Self {
        Self {
            validator: Arc::clone(&self.validator),
        }
    }
}

impl<C: 'static> ValidationGate<C> {
    pub fn new(validator: Arc<dyn Validator<C>>) -> Self {
        Self { validator }
    }

    /// Build a gate from the validator registered for `C`.
    pub fn from_registry(registry: &ValidatorRegistry) -> Result<Self, RegistryError> {
        registry.require::<C>().map(Self::new)
    }

    /// Run the gate.
    ///
    /// `bound` is the outcome of binding the command from the request. On
    /// success the command is validated and, if valid, handed to `next`; its
    /// output is returned as-is.
    pub async fn pass<E, F, Fut>(
        &self,
        bound: Result<C, E>,
        next: F,
    ) -> Result<Fut::Output, Rejection>
    where
        E: Display,
        F: FnOnce(C) -> Fut,
        Fut: Future,
    {
        let command = match bound {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!(command = std::any::type_name::<C>(), "command not bound: {e}");
                return Err(Rejection::BadRequest(e.to_string()));
            }
        };

        let verdict = self.validator.validate(&command);
        if !verdict.is_valid() {
            tracing::debug!(
                command = std::any::type_name::<C>(),
                fields = ?verdict.errors().keys().collect::<Vec<_>>(),
                "command rejected by validator"
            );
            return Err(Rejection::ValidationFailed(verdict));
        }

        Ok(next(command).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{RuleSet, rules};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone, PartialEq)]
    struct Rename {
        name: Option<String>,
    }

    fn gate() -> ValidationGate<Rename> {
        let rules = RuleSet::new().rule("Name", |r: &Rename, name| {
            rules::not_empty_text(name, r.name.as_deref())
        });
        ValidationGate::<Rename>::new(Arc::new(rules))
    }

    struct CountingValidator {
        calls: AtomicUsize,
    }

    impl Validator<Rename> for CountingValidator {
        fn validate(&self, _command: &Rename) -> ValidationResult {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ValidationResult::valid()
        }
    }

    #[tokio::test]
    async fn invalid_command_never_reaches_next() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let outcome = gate()
            .pass(Ok::<_, String>(Rename { name: Some(String::new()) }), move |_cmd| async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        match outcome {
            Err(Rejection::ValidationFailed(result)) => {
                assert_eq!(result.field_errors("Name"), &["'Name' must not be empty.".to_string()]);
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn valid_command_reaches_next_once_and_output_is_returned_unchanged() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let outcome = gate()
            .pass(Ok::<_, String>(Rename { name: Some("ada".into()) }), move |cmd| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err::<u32, String>(format!("handler failed for {}", cmd.name.unwrap()))
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(outcome, Ok(Err("handler failed for ada".to_string())));
    }

    #[tokio::test]
    async fn unbound_command_is_bad_request_and_skips_validator() {
        let validator = Arc::new(CountingValidator { calls: AtomicUsize::new(0) });
        let gate: ValidationGate<Rename> = ValidationGate::new(validator.clone());

        let next_calls = AtomicUsize::new(0);
        let counter = &next_calls;
        let outcome = gate
            .pass(Err("missing body"), move |_cmd| async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .await;

        assert_eq!(outcome, Err(Rejection::BadRequest("missing body".to_string())));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(next_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn gate_built_from_registry_uses_registered_validator() {
        let validator = Arc::new(CountingValidator { calls: AtomicUsize::new(0) });
        let mut registry = ValidatorRegistry::new();
        registry.register::<Rename>(validator.clone());

        let gate = ValidationGate::<Rename>::from_registry(&registry).unwrap();
        let outcome = gate
            .pass(Ok::<_, String>(Rename { name: None }), |_cmd| async { 7 })
            .await;

        assert_eq!(outcome, Ok(7));
        assert_eq!(validator.calls.load(Ordering::SeqCst), 1);
    }
}
