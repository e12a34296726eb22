//! User repository trait

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use std::fmt::Debug;

use super::entity::{NewUser, User, UserId};
use crate::domain::DomainError;

/// Repository trait for user storage
///
/// Each call touches at most one row. Read-modify-write sequences built on
/// top of `get` and `update` are last-write-wins.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    /// Get a user by their ID
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError>;

    /// List all users, highest points first, ties by username ascending
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// Persist a new user and return it with its assigned ID
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;

    /// Persist every field of an existing user
    async fn update(&self, user: &User) -> Result<User, DomainError>;

    /// Delete a user, returning whether a row was removed
    async fn delete(&self, id: UserId) -> Result<bool, DomainError>;
}

/// Ordering shared by every repository: points descending, then username
pub fn leaderboard_order(a: &User, b: &User) -> std::cmp::Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| a.username().cmp(b.username()))
}
