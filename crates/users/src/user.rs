use serde::{Deserialize, Serialize};

use ember_core::validation::rules;
use ember_core::{Entity, RuleSet, UserId, ValidationResult, Validator};

/// Command: CreateUser.
///
/// Bound from the request body. A missing `userName` binds as `None` and is
/// reported by validation rather than by binding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    #[serde(default)]
    pub user_name: Option<String>,
}

impl CreateUser {
    pub fn new(user_name: impl Into<String>) -> Self {
        Self {
            user_name: Some(user_name.into()),
        }
    }
}

/// A user not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub user_name: String,
}

/// A persisted user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: UserId,
    pub user_name: String,
}

impl User {
    pub fn from_new(id: UserId, new: NewUser) -> Self {
        Self {
            id,
            user_name: new.user_name,
        }
    }
}

impl Entity for User {
    type Id = UserId;

    fn id(&self) -> UserId {
        self.id
    }
}

/// Map a validated command onto the entity to create.
pub fn new_user(command: CreateUser) -> NewUser {
    NewUser {
        user_name: command.user_name.unwrap_or_default().trim().to_string(),
    }
}

/// Rules for [`CreateUser`]: the user name must not be empty.
pub struct CreateUserValidator {
    rules: RuleSet<CreateUser>,
}

impl CreateUserValidator {
    pub const USER_NAME: &'static str = "UserName";

    pub fn new() -> Self {
        let rules = RuleSet::new().rule(Self::USER_NAME, |c: &CreateUser, name| {
            rules::not_empty_text(name, c.user_name.as_deref())
        });
        Self { rules }
    }
}

impl Default for CreateUserValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator<CreateUser> for CreateUserValidator {
    fn validate(&self, command: &CreateUser) -> ValidationResult {
        self.rules.validate(command)
    }
}
