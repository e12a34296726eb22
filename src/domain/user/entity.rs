//! User entity and related types

use chrono::{DateTime, NaiveDate, Utc};

use super::validation::validate_user_id;
use crate::domain::DomainError;

/// Message returned when a well-formed user ID names no record
pub const USER_NOT_FOUND: &str = "There is no user found with this userID.";

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(i64);

impl UserId {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parse a user ID from a path segment.
    ///
    /// Anything other than a non-empty run of ASCII digits is an invalid ID.
    /// A digit string too large for the store's key type cannot name an
    /// existing record and is reported as not found.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        validate_user_id(raw)?;

        raw.parse::<i64>()
            .map(Self)
            .map_err(|_| DomainError::not_found(USER_NOT_FOUND))
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user that has not been persisted yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub date_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

impl NewUser {
    pub fn new(username: impl Into<String>, first_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            first_name: first_name.into(),
            date_birth: None,
            address: None,
        }
    }

    pub fn with_date_birth(mut self, date_birth: NaiveDate) -> Self {
        self.date_birth = Some(date_birth);
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// Raw column values used to rebuild a persisted user
#[derive(Debug, Clone)]
pub struct UserParts {
    pub id: UserId,
    pub username: String,
    pub first_name: String,
    pub points: i64,
    pub date_birth: Option<NaiveDate>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User record with a points counter
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserId,
    username: String,
    first_name: String,
    /// Never negative
    points: i64,
    date_birth: Option<NaiveDate>,
    address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// Materialize a new user under a freshly assigned ID with zero points
    pub fn from_new(id: UserId, new_user: NewUser) -> Self {
        let now = Utc::now();

        Self {
            id,
            username: new_user.username,
            first_name: new_user.first_name,
            points: 0,
            date_birth: new_user.date_birth,
            address: new_user.address,
            created_at: now,
            updated_at: now,
        }
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn date_birth(&self) -> Option<NaiveDate> {
        self.date_birth
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // Mutators

    /// Set the first name together with the username derived from it
    pub fn rename(&mut self, first_name: impl Into<String>, username: impl Into<String>) {
        self.first_name = first_name.into();
        self.username = username.into();
        self.touch();
    }

    pub fn set_date_birth(&mut self, date_birth: NaiveDate) {
        self.date_birth = Some(date_birth);
        self.touch();
    }

    pub fn set_address(&mut self, address: impl Into<String>) {
        self.address = Some(address.into());
        self.touch();
    }

    /// Add one point
    pub fn increment_points(&mut self) {
        self.points = self.points.saturating_add(1);
        self.touch();
    }

    /// Remove one point unless already at zero.
    ///
    /// Returns whether the counter changed.
    pub fn decrement_points(&mut self) -> bool {
        if self.points == 0 {
            return false;
        }

        self.points -= 1;
        self.touch();
        true
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl TryFrom<UserParts> for User {
    type Error = DomainError;

    fn try_from(parts: UserParts) -> Result<Self, Self::Error> {
        if parts.points < 0 {
            return Err(DomainError::storage(format!(
                "User {} has negative points ({})",
                parts.id, parts.points
            )));
        }

        Ok(Self {
            id: parts.id,
            username: parts.username,
            first_name: parts.first_name,
            points: parts.points,
            date_birth: parts.date_birth,
            address: parts.address,
            created_at: parts.created_at,
            updated_at: parts.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_user(points: i64) -> User {
        let now = Utc::now();
        User::try_from(UserParts {
            id: UserId::new(1),
            username: "john-abcdefghij".to_string(),
            first_name: "John".to_string(),
            points,
            date_birth: None,
            address: None,
            created_at: now,
            updated_at: now,
        })
        .unwrap()
    }

    #[test]
    fn test_user_id_parse() {
        assert_eq!(UserId::parse("42").unwrap(), UserId::new(42));
        assert_eq!(UserId::parse("007").unwrap(), UserId::new(7));
        assert_eq!(UserId::parse("0").unwrap(), UserId::new(0));
    }

    #[test]
    fn test_user_id_parse_malformed() {
        for raw in ["", "abc", "-1", "1.5", "12a", " 1", "+1", "１"] {
            let err = UserId::parse(raw).unwrap_err();
            assert!(matches!(err, DomainError::InvalidId { .. }), "{raw:?}");
        }
    }

    #[test]
    fn test_user_id_parse_overflow_is_not_found() {
        let err = UserId::parse("99999999999999999999999").unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.message(), USER_NOT_FOUND);
    }

    #[test]
    fn test_from_new_starts_at_zero_points() {
        let date = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
        let new_user = NewUser::new("john-abcdefghij", "John")
            .with_date_birth(date)
            .with_address("123 Main St");

        let user = User::from_new(UserId::new(3), new_user);

        assert_eq!(user.id(), UserId::new(3));
        assert_eq!(user.points(), 0);
        assert_eq!(user.first_name(), "John");
        assert_eq!(user.date_birth(), Some(date));
        assert_eq!(user.address(), Some("123 Main St"));
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let mut user = create_test_user(0);

        assert!(!user.decrement_points());
        assert!(!user.decrement_points());
        assert_eq!(user.points(), 0);
    }

    #[test]
    fn test_increment_then_decrement() {
        let mut user = create_test_user(5);

        user.increment_points();
        assert_eq!(user.points(), 6);

        assert!(user.decrement_points());
        assert_eq!(user.points(), 5);
    }

    #[test]
    fn test_rename_updates_username() {
        let mut user = create_test_user(0);
        let original_updated = user.updated_at();

        std::thread::sleep(std::time::Duration::from_millis(5));

        user.rename("Jane", "jane-0123456789");
        assert_eq!(user.first_name(), "Jane");
        assert_eq!(user.username(), "jane-0123456789");
        assert!(user.updated_at() > original_updated);
    }

    #[test]
    fn test_negative_points_rejected() {
        let now = Utc::now();
        let result = User::try_from(UserParts {
            id: UserId::new(1),
            username: "x-0123456789".to_string(),
            first_name: "X".to_string(),
            points: -1,
            date_birth: None,
            address: None,
            created_at: now,
            updated_at: now,
        });

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }
}
