//! Internal RPC contract: JSON over HTTP.
//!
//! Each backend serves `POST /rpc/<Method>` on its HTTP port. Success is a
//! 200 with the method's response message; failure is the mapped HTTP
//! status with a `{code, message}` body, where `code` follows a fixed
//! outward-facing table. HTTP and RPC handlers call the same service-layer
//! functions, so the two surfaces cannot drift.

pub mod messages;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Outward-facing RPC status codes, named after the gRPC status
/// vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RpcCode {
    InvalidArgument,
    Unauthenticated,
    PermissionDenied,
    NotFound,
    AlreadyExists,
    Unavailable,
    Internal,
}

impl RpcCode {
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::AlreadyExists => StatusCode::CONFLICT,
            Self::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&ServiceError> for RpcCode {
    fn from(err: &ServiceError) -> Self {
        match err.status() {
            StatusCode::BAD_REQUEST => Self::InvalidArgument,
            StatusCode::UNAUTHORIZED => Self::Unauthenticated,
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound,
            StatusCode::CONFLICT => Self::AlreadyExists,
            StatusCode::SERVICE_UNAVAILABLE => Self::Unavailable,
            _ => Self::Internal,
        }
    }
}

/// Error body on the RPC wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcFailure {
    pub code: RpcCode,
    pub message: String,
}

/// Wrapper that renders a [`ServiceError`] as an RPC failure response.
/// RPC handlers return `Result<Json<Resp>, RpcFault>`.
#[derive(Debug)]
pub struct RpcFault(pub ServiceError);

impl From<ServiceError> for RpcFault {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for RpcFault {
    fn into_response(self) -> Response {
        let code = RpcCode::from(&self.0);
        if code == RpcCode::Internal {
            tracing::error!(error = %self.0, "rpc handler failed");
        }
        let message = match code {
            // Keep internal detail out of the wire message.
            RpcCode::Internal => "Internal server error".to_string(),
            _ => self.0.to_string(),
        };
        (code.http_status(), Json(RpcFailure { code, message })).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The backend was unreachable or returned garbage.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The backend answered with an error status.
    #[error("{message}")]
    Status { code: RpcCode, message: String },
}

/// Thin JSON-RPC client used by the gateway (and service health probes).
#[derive(Clone)]
pub struct RpcClient {
    http: reqwest::Client,
}

impl Default for RpcClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RpcClient {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
        }
    }

    pub async fn call<Req, Resp>(
        &self,
        base_url: &str,
        method: &str,
        request: &Req,
    ) -> Result<Resp, RpcError>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}/rpc/{}", base_url.trim_end_matches('/'), method);
        let response = self.http.post(&url).json(request).send().await?;

        if response.status().is_success() {
            return Ok(response.json().await?);
        }

        let status = response.status();
        match response.json::<RpcFailure>().await {
            Ok(failure) => Err(RpcError::Status {
                code: failure.code,
                message: failure.message,
            }),
            Err(_) => Err(RpcError::Status {
                code: RpcCode::Internal,
                message: format!("backend returned {}", status),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_serde_is_screaming_snake() {
        assert_eq!(
            serde_json::to_string(&RpcCode::AlreadyExists).unwrap(),
            "\"ALREADY_EXISTS\""
        );
        let code: RpcCode = serde_json::from_str("\"PERMISSION_DENIED\"").unwrap();
        assert_eq!(code, RpcCode::PermissionDenied);
    }

    #[test]
    fn service_errors_map_to_the_fixed_table() {
        assert_eq!(
            RpcCode::from(&ServiceError::NotFound("x".into())),
            RpcCode::NotFound
        );
        assert_eq!(
            RpcCode::from(&ServiceError::Conflict("x".into())),
            RpcCode::AlreadyExists
        );
        assert_eq!(
            RpcCode::from(&ServiceError::Forbidden("x".into())),
            RpcCode::PermissionDenied
        );
        assert_eq!(
            RpcCode::from(&ServiceError::validation("x")),
            RpcCode::InvalidArgument
        );
        assert_eq!(RpcCode::from(&ServiceError::Internal), RpcCode::Internal);
    }

    #[test]
    fn codes_round_trip_to_http() {
        assert_eq!(RpcCode::NotFound.http_status(), StatusCode::NOT_FOUND);
        assert_eq!(RpcCode::AlreadyExists.http_status(), StatusCode::CONFLICT);
        assert_eq!(RpcCode::Unavailable.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn fault_body_shape() {
        let fault = RpcFault(ServiceError::Conflict("Already enrolled in this course".into()));
        let resp = fault.into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let failure: RpcFailure = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(failure.code, RpcCode::AlreadyExists);
        assert_eq!(failure.message, "Already enrolled in this course");
    }

    #[tokio::test]
    async fn internal_faults_hide_detail() {
        let fault = RpcFault(ServiceError::Db(crate::db::DbError::Sqlx(
            sqlx::Error::PoolClosed,
        )));
        let resp = fault.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let failure: RpcFailure = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(failure.message, "Internal server error");
    }
}
