//! Shared domain types.

pub mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use validation::ValidationError;

/// User role. Stored as lowercase text in the `users.role` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Faculty,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            other => Err(ValidationError::InvalidVariant {
                field: "role",
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Course lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseStatus {
    Open,
    Closed,
}

impl CourseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_owned(),
            }),
        }
    }
}

/// The user shape returned to clients; never carries the password hash.
/// Field names are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPublic {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub first_name: String,
    pub last_name: String,
}
