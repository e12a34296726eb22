//! User infrastructure module
//!
//! Implementations for user persistence (in-memory and PostgreSQL),
//! username generation, and the user service.

mod postgres_repository;
mod repository;
mod service;
mod username;

pub use postgres_repository::PostgresUserRepository;
pub use repository::InMemoryUserRepository;
pub use service::{CreateUserRequest, UpdateUserRequest, UserService};
pub use username::{RandomUsernameGenerator, UsernameGenerator};
