//! Gateway-side error rendering.
//!
//! Backend RPC failures carry their own status and message; those pass
//! through. Transport failures collapse to a per-route fallback message
//! so backend addresses never leak to clients.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use enroll_core::rpc::RpcError;

#[derive(Debug)]
pub struct GatewayError {
    status: StatusCode,
    message: String,
}

impl GatewayError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: &str) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn from_rpc(err: RpcError, fallback: &str) -> Self {
        match err {
            RpcError::Status { code, message } => Self::new(code.http_status(), message),
            RpcError::Transport(e) => {
                tracing::error!(error = %e, "backend unreachable");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, fallback)
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "success": false, "error": self.message })),
        )
            .into_response()
    }
}
