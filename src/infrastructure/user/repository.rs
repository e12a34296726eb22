//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{
    NewUser, USER_NOT_FOUND, User, UserId, UserRepository, leaderboard_order,
};
use crate::domain::DomainError;

#[derive(Debug)]
struct Table {
    rows: BTreeMap<i64, User>,
    /// Next ID to hand out; only ever grows so IDs are never reused
    next_id: i64,
}

/// In-memory implementation of UserRepository
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    table: Arc<RwLock<Table>>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self {
            table: Arc::new(RwLock::new(Table {
                rows: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id.value()).cloned())
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        let table = self.table.read().await;

        let mut users: Vec<User> = table.rows.values().cloned().collect();
        users.sort_by(leaderboard_order);

        Ok(users)
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        let id = table.next_id;
        table.next_id += 1;

        let user = User::from_new(UserId::new(id), user);
        table.rows.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let mut table = self.table.write().await;

        match table.rows.get_mut(&user.id().value()) {
            Some(row) => {
                *row = user.clone();
                Ok(user.clone())
            }
            None => Err(DomainError::not_found(USER_NOT_FOUND)),
        }
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id.value()).is_some())
    }
}
