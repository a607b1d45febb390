use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Rejected form input. The display text is what the user is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Please enter a name.")]
    EmptyName,
    #[error("Please enter a valid age.")]
    InvalidAge,
    #[error("Please enter a valid email.")]
    InvalidEmail,
}

impl ValidationError {
    pub fn field(self) -> &'static str {
        match self {
            ValidationError::EmptyName => "name",
            ValidationError::InvalidAge => "age",
            ValidationError::InvalidEmail => "email",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort mode '{0}' (expected name, age or email)")]
pub struct UnknownSortMode(pub String);
