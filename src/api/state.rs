//! Application state for shared services

use std::sync::Arc;

use crate::domain::{DomainError, User};
use crate::domain::user::UserRepository;
use crate::infrastructure::user::{
    CreateUserRequest, UpdateUserRequest, UserService, UsernameGenerator,
};

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
}

impl AppState {
    pub fn new(user_service: Arc<dyn UserServiceTrait>) -> Self {
        Self { user_service }
    }
}

/// Trait for user service operations
#[async_trait::async_trait]
pub trait UserServiceTrait: Send + Sync {
    async fn list(&self) -> Result<Vec<User>, DomainError>;
    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError>;
    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError>;
    async fn delete(&self, id: &str) -> Result<(), DomainError>;
    async fn increment_points(&self, id: &str) -> Result<User, DomainError>;
    async fn decrement_points(&self, id: &str) -> Result<User, DomainError>;
}

#[async_trait::async_trait]
impl<R: UserRepository + 'static, G: UsernameGenerator + 'static> UserServiceTrait
    for UserService<R, G>
{
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        UserService::list(self).await
    }

    async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        UserService::create(self, request).await
    }

    async fn update(&self, id: &str, request: UpdateUserRequest) -> Result<User, DomainError> {
        UserService::update(self, id, request).await
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        UserService::delete(self, id).await
    }

    async fn increment_points(&self, id: &str) -> Result<User, DomainError> {
        UserService::increment_points(self, id).await
    }

    async fn decrement_points(&self, id: &str) -> Result<User, DomainError> {
        UserService::decrement_points(self, id).await
    }
}
