//! Validation contract: validators, their verdicts, and declarative rule sets.
//!
//! A validator is a pure, synchronous function from a command to a
//! [`ValidationResult`]. Feature validators are usually a [`RuleSet`] declared
//! once in a constructor:
//!
//! ```ignore
//! let rules = RuleSet::new()
//!     .rule("Amount", |c: &CreateMovement, name| rules::not_empty(name, c.amount.as_ref()))
//!     .rule("Amount", move |c, name| rules::greater_than(name, c.amount.as_ref(), &min));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

/// Verdict of one validation call: field name → ordered error messages.
///
/// The verdict is valid iff no field has an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    /// A passing verdict.
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Messages recorded for `field`, in the order the rules were declared.
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Record one violation for `field`.
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(field.into()).or_default().push(message.into());
    }
}

/// Validator for commands of type `C`.
///
/// Implementations must be deterministic and total: every well-formed `C` gets a
/// verdict, nothing panics, nothing is written anywhere.
pub trait Validator<C>: Send + Sync {
    fn validate(&self, command: &C) -> ValidationResult;
}

impl<C, V> Validator<C> for Arc<V>
where
    V: Validator<C> + ?Sized,
{
    fn validate(&self, command: &C) -> ValidationResult {
        (**self).validate(command)
    }
}

type Check<C> = Box<dyn Fn(&C, &str) -> Option<String> + Send + Sync>;

struct Rule<C> {
    field: &'static str,
    display: String,
    check: Check<C>,
}

/// Ordered, static list of field rules.
///
/// Each rule names the field it reports under and a check that receives the
/// command plus the field's display name and returns a message on violation.
/// Every rule runs on every call; messages accumulate per field in declaration
/// order.
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
}

impl<C> RuleSet<C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rule<F>(mut self, field: &'static str, check: F) -> Self
    where
        F: Fn(&C, &str) -> Option<String> + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field,
            display: display_name(field),
            check: Box::new(check),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> Validator<C> for RuleSet<C> {
    fn validate(&self, command: &C) -> ValidationResult {
        let mut result = ValidationResult::valid();
        for rule in &self.rules {
            if let Some(message) = (rule.check)(command, &rule.display) {
                result.add_error(rule.field, message);
            }
        }
        result
    }
}

/// Human-readable form of a field name: `UserName` → `User Name`.
pub fn display_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len() + 4);
    let mut prev: Option<char> = None;
    for c in field.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push(' ');
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

/// Reusable rule checks. Each returns `Some(message)` on violation.
pub mod rules {
    use core::fmt::Display;

    /// Text must be present and contain something other than whitespace.
    pub fn not_empty_text(name: &str, value: Option<&str>) -> Option<String> {
        match value {
            Some(v) if !v.trim().is_empty() => None,
            _ => Some(format!("'{name}' must not be empty.")),
        }
    }

    /// Value must be present and differ from its type's default (zero for numbers).
    pub fn not_empty<T>(name: &str, value: Option<&T>) -> Option<String>
    where
        T: Default + PartialEq,
    {
        match value {
            Some(v) if *v != T::default() => None,
            _ => Some(format!("'{name}' must not be empty.")),
        }
    }

    /// Value must be strictly greater than `bound`. Absent values are not compared.
    pub fn greater_than<T>(name: &str, value: Option<&T>, bound: &T) -> Option<String>
    where
        T: PartialOrd + Display,
    {
        match value {
            Some(v) if v <= bound => Some(format!("'{name}' must be greater than '{bound}'.")),
            _ => None,
        }
    }
}
