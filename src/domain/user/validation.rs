//! User validation utilities

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::input::{FieldContent, FieldInput};

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("The userID field must be a valid integer.")]
    InvalidUserId,

    #[error("The firstName field is required.")]
    FirstNameRequired,

    #[error("The firstName field must be a string of at most {0} characters.")]
    InvalidFirstName(usize),

    #[error("The dateBirth field cannot be empty.")]
    EmptyDateBirth,

    #[error("Invalid date format for dateBirth. Use YYYY-MM-DD format (e.g., 2023-10-15).")]
    InvalidDateBirth,

    #[error("The address field cannot be empty.")]
    EmptyAddress,

    #[error("The address field must be a string.")]
    AddressNotString,

    #[error("The address field must be at most {0} characters.")]
    AddressTooLong(usize),

    #[error("At least one valid property (firstName, dateBirth, or address) must be provided in the request body.")]
    NoUpdatableField,
}

pub const MAX_FIRST_NAME_LENGTH: usize = 50;
pub const MAX_ADDRESS_LENGTH: usize = 255;

static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").expect("valid date regex"));

/// Validated fields for a user about to be created
#[derive(Debug, Clone, PartialEq)]
pub struct NewUserFields {
    pub first_name: String,
    pub date_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

/// Validated set of changes to apply to an existing user
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserChanges {
    pub first_name: Option<String>,
    pub date_birth: Option<NaiveDate>,
    pub address: Option<String>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.date_birth.is_none() && self.address.is_none()
    }
}

/// Validate a user ID path segment
///
/// Rules:
/// - Cannot be empty
/// - ASCII digits only (no sign, no whitespace)
pub fn validate_user_id(raw: &str) -> Result<(), UserValidationError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(UserValidationError::InvalidUserId);
    }

    Ok(())
}

/// Validate the body of a create request.
///
/// Fields are checked in order firstName, dateBirth, address and the first
/// failure is returned.
pub fn validate_new_user(
    first_name: &FieldInput,
    date_birth: &FieldInput,
    address: &FieldInput,
) -> Result<NewUserFields, UserValidationError> {
    let first_name = match first_name.content() {
        FieldContent::Absent | FieldContent::Empty => {
            return Err(UserValidationError::FirstNameRequired);
        }
        content => validate_first_name(content)?,
    };

    Ok(NewUserFields {
        first_name,
        date_birth: validate_optional_date_birth(date_birth)?,
        address: validate_optional_address(address)?,
    })
}

/// Validate the body of an update request.
///
/// At least one editable field must be present. Present fields are checked
/// in order firstName, dateBirth, address and the first failure is returned.
pub fn validate_user_changes(
    first_name: &FieldInput,
    date_birth: &FieldInput,
    address: &FieldInput,
) -> Result<UserChanges, UserValidationError> {
    if !(first_name.is_present() || date_birth.is_present() || address.is_present()) {
        return Err(UserValidationError::NoUpdatableField);
    }

    let first_name = match first_name.content() {
        FieldContent::Absent => None,
        content => Some(validate_first_name(content)?),
    };

    Ok(UserChanges {
        first_name,
        date_birth: validate_optional_date_birth(date_birth)?,
        address: validate_optional_address(address)?,
    })
}

fn validate_first_name(content: FieldContent<'_>) -> Result<String, UserValidationError> {
    match content {
        FieldContent::Text(name) if name.chars().count() <= MAX_FIRST_NAME_LENGTH => {
            Ok(name.to_string())
        }
        _ => Err(UserValidationError::InvalidFirstName(MAX_FIRST_NAME_LENGTH)),
    }
}

fn validate_optional_date_birth(
    input: &FieldInput,
) -> Result<Option<NaiveDate>, UserValidationError> {
    match input.content() {
        FieldContent::Absent => Ok(None),
        FieldContent::Empty => Err(UserValidationError::EmptyDateBirth),
        FieldContent::Text(raw) => parse_date_birth(raw).map(Some),
        FieldContent::Other => Err(UserValidationError::InvalidDateBirth),
    }
}

fn validate_optional_address(input: &FieldInput) -> Result<Option<String>, UserValidationError> {
    match input.content() {
        FieldContent::Absent => Ok(None),
        FieldContent::Empty => Err(UserValidationError::EmptyAddress),
        FieldContent::Other => Err(UserValidationError::AddressNotString),
        FieldContent::Text(address) => {
            if address.chars().count() > MAX_ADDRESS_LENGTH {
                return Err(UserValidationError::AddressTooLong(MAX_ADDRESS_LENGTH));
            }

            Ok(Some(address.to_string()))
        }
    }
}

/// Parse a strict `YYYY-MM-DD` calendar date
pub fn parse_date_birth(raw: &str) -> Result<NaiveDate, UserValidationError> {
    if !DATE_SHAPE.is_match(raw) {
        return Err(UserValidationError::InvalidDateBirth);
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| UserValidationError::InvalidDateBirth)
}
