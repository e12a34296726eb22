//! PostgreSQL user repository implementation

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, PgPool};

use crate::domain::user::{NewUser, USER_NOT_FOUND, User, UserId, UserParts, UserRepository};
use crate::domain::DomainError;

const USER_COLUMNS: &str =
    "id, username, first_name, points, date_birth, address, created_at, updated_at";

/// PostgreSQL implementation of UserRepository
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| storage_error("get user", e))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, DomainError> {
        // COLLATE "C" keeps username ties in byte order, matching the in-memory store
        let rows = sqlx::query_as::<_, UserRow>(&format!(
            r#"SELECT {USER_COLUMNS} FROM users ORDER BY points DESC, username COLLATE "C" ASC"#
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| storage_error("list users", e))?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (username, first_name, points, date_birth, address)
            VALUES ($1, $2, 0, $3, $4)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(user.date_birth)
        .bind(&user.address)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| storage_error("create user", e))?;

        row.into_user()
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET username = $2, first_name = $3, points = $4, date_birth = $5,
                address = $6, updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(user.id().value())
        .bind(user.username())
        .bind(user.first_name())
        .bind(user.points())
        .bind(user.date_birth())
        .bind(user.address())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| storage_error("update user", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(USER_NOT_FOUND));
        }

        Ok(user.clone())
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| storage_error("delete user", e))?;

        Ok(result.rows_affected() > 0)
    }
}

/// One row of the `users` table
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i64,
    username: String,
    first_name: String,
    points: i64,
    date_birth: Option<NaiveDate>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> Result<User, DomainError> {
        User::try_from(UserParts {
            id: UserId::new(self.id),
            username: self.username,
            first_name: self.first_name,
            points: self.points,
            date_birth: self.date_birth,
            address: self.address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

fn storage_error(action: &str, err: sqlx::Error) -> DomainError {
    DomainError::storage(format!("Failed to {}: {}", action, err))
}
