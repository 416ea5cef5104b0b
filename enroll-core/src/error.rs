//! Service error taxonomy and its JSON envelope rendering.
//!
//! Service layers return [`ServiceError`]; the HTTP layer renders it as
//! the uniform `{success, error}` envelope and the RPC layer maps it onto
//! the fixed outward-facing code table.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::validation::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// 400 with optional per-field `details`.
    #[error("{message}")]
    Validation {
        message: String,
        details: Option<serde_json::Value>,
    },

    #[error("{0}")]
    Unauthenticated(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    /// 503; a dependency (database, auth service) is unreachable.
    #[error("{0}")]
    Unavailable(String),

    /// 500 with a fixed outward message; detail stays in the log.
    #[error("Internal server error")]
    Internal,

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ServiceError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Db(DbError::Unavailable) | Self::Db(DbError::PrimaryUnavailable) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Db(DbError::Sqlx(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Outward message. Database detail is never surfaced.
    fn public_message(&self) -> String {
        match self {
            Self::Db(DbError::Unavailable) | Self::Db(DbError::PrimaryUnavailable) => {
                "Database unavailable".into()
            }
            Self::Db(DbError::Sqlx(_)) => "Internal server error".into(),
            other => other.to_string(),
        }
    }

    /// Render the `{success: false, error}` envelope, tagging server-side
    /// failures with the originating service.
    pub fn into_envelope(self, service: &'static str) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(service, error = %self, "request failed");
        }

        let mut body = json!({
            "success": false,
            "error": self.public_message(),
        });
        if let Self::Validation {
            details: Some(details),
            ..
        } = &self
        {
            body["details"] = details.clone();
        }
        if status.is_server_error() {
            body["service"] = json!(service);
        }

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ServiceError {
    fn from(e: ValidationError) -> Self {
        Self::validation(e.to_string())
    }
}
