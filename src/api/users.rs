//! User and points endpoints

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, put},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, UserIdParam};
use crate::domain::User;
use crate::domain::user::FieldInput;
use crate::infrastructure::user::{CreateUserRequest, UpdateUserRequest};

/// Editable user fields as sent by clients.
///
/// Only JSON objects are accepted; a key that is missing stays `Absent`
/// while an explicit `null` is kept as `Null`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct UserApiRequest {
    pub first_name: FieldInput,
    pub date_birth: FieldInput,
    pub address: FieldInput,
}

impl From<Map<String, Value>> for UserApiRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            first_name: take_field(&mut body, "firstName"),
            date_birth: take_field(&mut body, "dateBirth"),
            address: take_field(&mut body, "address"),
        }
    }
}

fn take_field(body: &mut Map<String, Value>, key: &str) -> FieldInput {
    match body.remove(key) {
        None => FieldInput::Absent,
        Some(Value::Null) => FieldInput::Null,
        Some(value) => FieldInput::Value(value),
    }
}

impl From<UserApiRequest> for CreateUserRequest {
    fn from(req: UserApiRequest) -> Self {
        Self {
            first_name: req.first_name,
            date_birth: req.date_birth,
            address: req.address,
        }
    }
}

impl From<UserApiRequest> for UpdateUserRequest {
    fn from(req: UserApiRequest) -> Self {
        Self {
            first_name: req.first_name,
            date_birth: req.date_birth,
            address: req.address,
        }
    }
}

/// Public representation of a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub username: String,
    pub first_name: String,
    pub points: i64,
    pub date_birth: Option<String>,
    pub address: Option<String>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.id().value(),
            username: user.username().to_string(),
            first_name: user.first_name().to_string(),
            points: user.points(),
            date_birth: user.date_birth().map(|d| d.format("%Y-%m-%d").to_string()),
            address: user.address().map(str::to_string),
        }
    }
}

/// Create the user router
pub fn create_users_router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", put(update_user).delete(delete_user))
        .route("/users/{user_id}/increment", put(increment_points))
        .route("/users/{user_id}/decrement", put(decrement_points))
}

/// GET /users
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list().await?;

    Ok(Json(users.iter().map(UserResponse::from).collect()))
}

/// POST /users
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserApiRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    debug!("Creating user");

    let user = state.user_service.create(request.into()).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(&user))))
}

/// PUT /users/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    user_id: UserIdParam,
    Json(request): Json<UserApiRequest>,
) -> Result<Json<UserResponse>, ApiError> {
    debug!(user_id = user_id.as_str(), "Updating user");

    let user = state.user_service.update(user_id.as_str(), request.into()).await?;

    Ok(Json(UserResponse::from(&user)))
}

/// DELETE /users/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    user_id: UserIdParam,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = user_id.as_str(), "Deleting user");

    state.user_service.delete(user_id.as_str()).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /users/{user_id}/increment
pub async fn increment_points(
    State(state): State<AppState>,
    user_id: UserIdParam,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = user_id.as_str(), "Incrementing points");

    state.user_service.increment_points(user_id.as_str()).await?;

    Ok(StatusCode::OK)
}

/// PUT /users/{user_id}/decrement
pub async fn decrement_points(
    State(state): State<AppState>,
    user_id: UserIdParam,
) -> Result<StatusCode, ApiError> {
    debug!(user_id = user_id.as_str(), "Decrementing points");

    state.user_service.decrement_points(user_id.as_str()).await?;

    Ok(StatusCode::OK)
}
