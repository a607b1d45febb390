//! Form input checks. Each validator trims its input first.

use std::sync::LazyLock;

use regex::Regex;

use crate::{domain::StudentFields, error::ValidationError};

/// `local@domain.tld`, every part free of whitespace and `@`.
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

pub fn validate_name(raw: &str) -> Result<String, ValidationError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Accepts any numeric text that denotes a whole, non-negative number
/// (`"20"`, `"20.0"`, `"+7"`). Fractions and values beyond `u32` are rejected.
pub fn validate_age(raw: &str) -> Result<u32, ValidationError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(ValidationError::InvalidAge);
    }
    if let Ok(age) = text.parse::<u32>() {
        return Ok(age);
    }

    let value: f64 = text.parse().map_err(|_| ValidationError::InvalidAge)?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return Err(ValidationError::InvalidAge);
    }
    Ok(value as u32)
}

pub fn validate_email(raw: &str) -> Result<String, ValidationError> {
    let email = raw.trim();
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email.to_string())
}

/// Runs name, then age, then email; stops at the first failure.
pub fn validate_fields(name: &str, age: &str, email: &str) -> Result<StudentFields, ValidationError> {
    let name = validate_name(name)?;
    let age = validate_age(age)?;
    let email = validate_email(email)?;
    Ok(StudentFields { name, age, email })
}

/// Re-checks an already typed record, used when trusting persisted data.
pub fn check_fields(fields: &StudentFields) -> Result<(), ValidationError> {
    if fields.name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if !EMAIL_REGEX.is_match(fields.email.trim()) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
