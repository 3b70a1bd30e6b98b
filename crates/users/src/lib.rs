//! "Create user" feature slice.
//!
//! Contract, validation rules, handler and repository contract for creating a
//! user. The HTTP route lives in `ember-api`.

pub mod handler;
pub mod repository;
pub mod user;

pub use handler::CreateUserHandler;
pub use repository::{InMemoryUserRepository, UnimplementedUserRepository, UserRepository};
pub use user::{CreateUser, CreateUserValidator, NewUser, User, new_user};
