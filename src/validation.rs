//! Structural checks applied to an employee before it is inserted.
//!
//! Only creation runs these. Manager updates go straight to the store.

use chrono::NaiveDate;
use thiserror::Error;
use validator::ValidateEmail;

use crate::database::models::{Birthdate, Employee};

pub const MIN_PASSWORD_LEN: usize = 3;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0}")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidFormat(&'static str),

    #[error("{0}")]
    OutOfRange(&'static str),

    #[error("password must be at least 3 characters")]
    TooShort,

    #[error("password must contain at least one digit and one uppercase letter")]
    MissingComplexity,
}

/// Run every creation check in order. `today` is the UTC date the birthdate
/// must not exceed.
pub fn validate_employee(employee: &Employee, today: NaiveDate) -> Result<(), ValidationError> {
    if employee.email.trim().is_empty() || employee.name.trim().is_empty() {
        return Err(ValidationError::MissingField("email and name are required"));
    }
    validate_email(&employee.email)?;
    validate_birthdate(&employee.birthdate, today)?;
    validate_password(&employee.password)?;
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat("invalid email format"))
    }
}

pub fn validate_birthdate(birthdate: &Birthdate, today: NaiveDate) -> Result<(), ValidationError> {
    check_digits(&birthdate.day, 2, "birthdate day must be two digits")?;
    check_digits(&birthdate.month, 2, "birthdate month must be two digits")?;
    check_digits(&birthdate.year, 4, "birthdate year must be four digits")?;

    let date = birthdate
        .to_date()
        .ok_or(ValidationError::InvalidFormat("birthdate is not a valid calendar date"))?;

    if date > today {
        return Err(ValidationError::OutOfRange("birthdate cannot be in the future"));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort);
    }

    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    if !has_digit || !has_upper {
        return Err(ValidationError::MissingComplexity);
    }
    Ok(())
}

fn check_digits(value: &str, width: usize, message: &'static str) -> Result<(), ValidationError> {
    if value.len() == width && value.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidFormat(message))
    }
}
