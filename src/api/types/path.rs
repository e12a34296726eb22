//! Path extractor for the `{user_id}` segment

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use super::error::ApiError;
use crate::domain::DomainError;
use crate::domain::user::validate_user_id;

/// Raw `{user_id}` path segment that has passed the digit-only check.
///
/// Path extractors run before the body is read, so a malformed ID is
/// reported ahead of any body error.
#[derive(Debug, Clone)]
pub struct UserIdParam(pub String);

impl UserIdParam {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for UserIdParam
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        validate_user_id(&raw).map_err(DomainError::from)?;

        Ok(Self(raw))
    }
}
