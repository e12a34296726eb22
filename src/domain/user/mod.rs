//! User domain
//!
//! Domain types for user records and their points counters: the entity,
//! the request-field input model, validation rules, username derivation and
//! the repository trait.

mod entity;
mod input;
mod repository;
mod username;
mod validation;

pub use entity::{NewUser, USER_NOT_FOUND, User, UserId, UserParts};
pub use input::FieldInput;
pub use repository::{UserRepository, leaderboard_order};
pub use username::{USERNAME_SUFFIX_LENGTH, build_username, username_stem};
pub use validation::{
    MAX_ADDRESS_LENGTH, MAX_FIRST_NAME_LENGTH, NewUserFields, UserChanges, UserValidationError,
    parse_date_birth, validate_new_user, validate_user_changes, validate_user_id,
};

#[cfg(test)]
pub use repository::MockUserRepository;
