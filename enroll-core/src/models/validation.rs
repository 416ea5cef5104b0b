//! Input validation for registration and profile updates.
//!
//! Rules mirror the account validator chain: email format and length,
//! password strength, and name character set.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

const MAX_EMAIL_LEN: usize = 255;
const MIN_PASSWORD_LEN: usize = 8;
const MAX_NAME_LEN: usize = 100;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email regex"));

/// Letters, spaces, apostrophes, and hyphens only.
static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s'-]*$").expect("invalid name regex"));

#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    Empty { field: &'static str },
    TooLong { field: &'static str, max: usize },
    TooShort { field: &'static str, min: usize },
    InvalidFormat { field: &'static str, reason: &'static str },
    InvalidVariant { field: &'static str, value: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} is required", field),
            Self::TooLong { field, max } => {
                write!(f, "{} must be less than {} characters", field, max)
            }
            Self::TooShort { field, min } => {
                write!(f, "{} must be at least {} characters", field, min)
            }
            Self::InvalidFormat { field, reason } => write!(f, "{}: {}", field, reason),
            Self::InvalidVariant { field, value } => {
                write!(f, "invalid {} value: '{}'", field, value)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::Empty { field: "email" });
    }
    if email.len() > MAX_EMAIL_LEN {
        return Err(ValidationError::TooLong {
            field: "email",
            max: MAX_EMAIL_LEN,
        });
    }
    if !EMAIL_RE.is_match(email) {
        return Err(ValidationError::InvalidFormat {
            field: "email",
            reason: "invalid email format",
        });
    }
    Ok(())
}

/// Minimum length plus at least one lowercase, one uppercase, one digit.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::Empty { field: "password" });
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password",
            min: MIN_PASSWORD_LEN,
        });
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(ValidationError::InvalidFormat {
            field: "password",
            reason: "must contain uppercase, lowercase, and a number",
        });
    }
    Ok(())
}

pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LEN,
        });
    }
    if !NAME_RE.is_match(name) {
        return Err(ValidationError::InvalidFormat {
            field,
            reason: "contains invalid characters",
        });
    }
    Ok(())
}
