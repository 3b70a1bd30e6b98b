use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ember_core::validation::rules;
use ember_core::{Entity, MovementId, RuleSet, ValidationResult, Validator};

/// Account every movement is booked against.
pub const DEFAULT_ACCOUNT: &str = "Conta Bancaria";

/// Command: CreateMovement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovement {
    /// Bound from the exact number text, never through a float.
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,
}

impl CreateMovement {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
        }
    }
}

/// A movement not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMovement {
    pub account: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

/// A persisted movement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movement {
    pub id: MovementId,
    pub account: String,
    pub amount: Decimal,
    pub created_at: DateTime<Utc>,
}

impl Movement {
    pub fn from_new(id: MovementId, new: NewMovement) -> Self {
        Self {
            id,
            account: new.account,
            amount: new.amount,
            created_at: new.created_at,
        }
    }
}

impl Entity for Movement {
    type Id = MovementId;

    fn id(&self) -> MovementId {
        self.id
    }
}

/// Map a validated command onto the movement to create.
///
/// The account is fixed and the creation time is stamped by the server.
pub fn new_movement(command: CreateMovement, now: DateTime<Utc>) -> NewMovement {
    NewMovement {
        account: DEFAULT_ACCOUNT.to_string(),
        amount: command.amount.unwrap_or_default(),
        created_at: now,
    }
}

/// Rules for [`CreateMovement`]: amount present, non-zero and above 0.01.
pub struct CreateMovementValidator {
    rules: RuleSet<CreateMovement>,
}

impl CreateMovementValidator {
    pub const AMOUNT: &'static str = "Amount";

    /// Exclusive lower bound for `amount`.
    pub fn minimum_amount() -> Decimal {
        Decimal::new(1, 2)
    }

    pub fn new() -> Self {
        let minimum = Self::minimum_amount();
        let rules = RuleSet::new()
            .rule(Self::AMOUNT, |c: &CreateMovement, name| {
                rules::not_empty(name, c.amount.as_ref())
            })
            .rule(Self::AMOUNT, move |c: &CreateMovement, name| {
                rules::greater_than(name, c.amount.as_ref(), &minimum)
            });
        Self { rules }
    }
}

impl Default for CreateMovementValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<CreateMovement> for CreateMovementValidator {
    fn validate(&self, command: &CreateMovement) -> ValidationResult {
        self.rules.validate(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn validate(amount: Decimal) -> ValidationResult {
        CreateMovementValidator::new().validate(&CreateMovement::new(amount))
    }

    #[test]
    fn zero_amount_fails_both_rules_in_order() {
        let result = validate(Decimal::ZERO);
        assert_eq!(
            result.field_errors("Amount"),
            &[
                "'Amount' must not be empty.".to_string(),
                "'Amount' must be greater than '0.01'.".to_string(),
            ]
        );
    }

    #[test]
    fn bound_itself_is_rejected() {
        let result = validate(Decimal::new(1, 2));
        assert_eq!(
            result.field_errors("Amount"),
            &["'Amount' must be greater than '0.01'.".to_string()]
        );
    }

    #[test]
    fn fifty_cents_passes() {
        assert!(validate(Decimal::new(50, 2)).is_valid());
    }

    #[test]
    fn missing_amount_is_reported_once() {
        let cmd: CreateMovement = serde_json::from_str("{}").unwrap();
        let result = CreateMovementValidator::new().validate(&cmd);
        assert_eq!(
            result.field_errors("Amount"),
            &["'Amount' must not be empty.".to_string()]
        );
    }

    #[test]
    fn binds_numeric_and_string_amounts() {
        let cmd: CreateMovement = serde_json::from_str(r#"{"amount":0.5}"#).unwrap();
        assert_eq!(cmd.amount, Some(Decimal::new(5, 1)));
        let cmd: CreateMovement = serde_json::from_str(r#"{"amount":"12.30"}"#).unwrap();
        assert_eq!(cmd.amount, Some(Decimal::new(1230, 2)));
    }

    #[test]
    fn amount_just_above_bound_keeps_every_digit() {
        let cmd: CreateMovement =
            serde_json::from_str(r#"{"amount":0.010000000000000001}"#).unwrap();
        let expected: Decimal = "0.010000000000000001".parse().unwrap();
        assert_eq!(cmd.amount, Some(expected));
        assert!(CreateMovementValidator::new().validate(&cmd).is_valid());
    }

    #[test]
    fn large_amount_binds_exactly() {
        let cmd: CreateMovement =
            serde_json::from_str(r#"{"amount":12345678901234567.89}"#).unwrap();
        let expected: Decimal = "12345678901234567.89".parse().unwrap();
        assert_eq!(cmd.amount, Some(expected));
        assert_eq!(
            new_movement(cmd, Utc::now()).amount.to_string(),
            "12345678901234567.89"
        );
    }

    #[test]
    fn null_amount_is_absent() {
        let cmd: CreateMovement = serde_json::from_str(r#"{"amount":null}"#).unwrap();
        assert_eq!(cmd.amount, None);
    }

    #[test]
    fn new_movement_books_against_default_account() {
        let now = Utc::now();
        let movement = new_movement(CreateMovement::new(Decimal::new(50, 2)), now);
        assert_eq!(movement.account, DEFAULT_ACCOUNT);
        assert_eq!(movement.amount, Decimal::new(50, 2));
        assert_eq!(movement.created_at, now);
    }

    proptest! {
        #[test]
        fn amounts_at_or_below_bound_are_invalid(cents in -1_000_000i64..=1) {
            let result = validate(Decimal::new(cents, 2));
            prop_assert!(!result.is_valid());
            prop_assert!(!result.field_errors("Amount").is_empty());
        }

        #[test]
        fn amounts_above_bound_are_valid(cents in 2i64..1_000_000_000) {
            let result = validate(Decimal::new(cents, 2));
            prop_assert!(result.is_valid());
            prop_assert!(result.errors().is_empty());
        }
    }
}
