//! User service composing validation, username generation and storage

use std::sync::Arc;

use metrics::counter;
use tracing::{debug, info};

use crate::domain::user::{
    FieldInput, NewUser, USER_NOT_FOUND, User, UserId, UserRepository, validate_new_user,
    validate_user_changes,
};
use crate::domain::DomainError;

use super::username::UsernameGenerator;

/// Request for creating a new user
#[derive(Debug, Clone, Default)]
pub struct CreateUserRequest {
    pub first_name: FieldInput,
    pub date_birth: FieldInput,
    pub address: FieldInput,
}

/// Request for updating an existing user; at least one field must be present
#[derive(Debug, Clone, Default)]
pub struct UpdateUserRequest {
    pub first_name: FieldInput,
    pub date_birth: FieldInput,
    pub address: FieldInput,
}

/// User service for the points ledger
#[derive(Debug)]
pub struct UserService<R: UserRepository, G: UsernameGenerator> {
    repository: Arc<R>,
    usernames: Arc<G>,
}

impl<R: UserRepository, G: UsernameGenerator> UserService<R, G> {
    /// Create a new user service
    pub fn new(repository: Arc<R>, usernames: Arc<G>) -> Self {
        Self {
            repository,
            usernames,
        }
    }

    /// List all users ordered by points descending, then username
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        self.repository.list().await
    }

    /// Create a new user with zero points
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        let fields = validate_new_user(&request.first_name, &request.date_birth, &request.address)?;

        let username = self.usernames.generate(&fields.first_name);
        let mut new_user = NewUser::new(username, fields.first_name);

        if let Some(date_birth) = fields.date_birth {
            new_user = new_user.with_date_birth(date_birth);
        }

        if let Some(address) = fields.address {
            new_user = new_user.with_address(address);
        }

        let user = self.repository.create(new_user).await?;

        counter!("users_created_total").increment(1);
        info!(user_id = %user.id(), username = %user.username(), "User created");

        Ok(user)
    }

    /// Apply the present fields of `request` to the user with the given ID
    pub async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        let user_id = UserId::parse(id)?;
        let changes =
            validate_user_changes(&request.first_name, &request.date_birth, &request.address)?;

        let mut user = self.find(user_id).await?;

        if let Some(first_name) = changes.first_name {
            let username = self.usernames.generate(&first_name);
            user.rename(first_name, username);
        }

        if let Some(date_birth) = changes.date_birth {
            user.set_date_birth(date_birth);
        }

        if let Some(address) = changes.address {
            user.set_address(address);
        }

        let user = self.repository.update(&user).await?;
        info!(user_id = %user.id(), "User updated");

        Ok(user)
    }

    /// Permanently remove a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let user_id = UserId::parse(id)?;
        self.find(user_id).await?;

        if !self.repository.delete(user_id).await? {
            return Err(DomainError::not_found(USER_NOT_FOUND));
        }

        counter!("users_deleted_total").increment(1);
        info!(user_id = %user_id, "User deleted");

        Ok(())
    }

    /// Add one point to a user
    pub async fn increment_points(&self, id: &str) -> Result<User, DomainError> {
        let user_id = UserId::parse(id)?;
        let mut user = self.find(user_id).await?;

        user.increment_points();
        let user = self.repository.update(&user).await?;

        counter!("user_points_adjusted_total", "direction" => "increment").increment(1);
        info!(user_id = %user_id, points = user.points(), "Points incremented");

        Ok(user)
    }

    /// Remove one point from a user; a user at zero is left untouched
    pub async fn decrement_points(&self, id: &str) -> Result<User, DomainError> {
        let user_id = UserId::parse(id)?;
        let mut user = self.find(user_id).await?;

        if !user.decrement_points() {
            debug!(user_id = %user_id, "Points already at zero, nothing to decrement");
            return Ok(user);
        }

        let user = self.repository.update(&user).await?;

        counter!("user_points_adjusted_total", "direction" => "decrement").increment(1);
        info!(user_id = %user_id, points = user.points(), "Points decremented");

        Ok(user)
    }

    async fn find(&self, id: UserId) -> Result<User, DomainError> {
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(USER_NOT_FOUND))
    }
}
