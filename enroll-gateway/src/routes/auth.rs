//! Auth routes: login over RPC, register relayed, logout answered here.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use enroll_core::http;
use enroll_core::rpc::messages::{LoginRequest, LoginResponse};

use crate::error::GatewayError;
use crate::state::GatewayState;

#[derive(Deserialize)]
pub struct LoginBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

pub async fn login(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<LoginBody>,
) -> Result<Response, GatewayError> {
    let (Some(email), Some(password)) = (body.email, body.password) else {
        return Err(GatewayError::bad_request("Email and password are required"));
    };
    if email.is_empty() || password.is_empty() {
        return Err(GatewayError::bad_request("Email and password are required"));
    }

    let resp: LoginResponse = state
        .rpc
        .call(&state.config.auth_url, "Login", &LoginRequest { email, password })
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Authentication service unavailable"))?;

    Ok(http::ok(resp))
}

/// Register stays an HTTP relay; the auth service owns the whole response
/// shape including the conflict and validation bodies.
pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, GatewayError> {
    let url = format!(
        "{}/api/auth/register",
        state.config.auth_url.trim_end_matches('/')
    );
    let upstream = state.http.post(&url).json(&body).send().await.map_err(|e| {
        tracing::error!(error = %e, "auth service unreachable");
        GatewayError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication service unavailable",
        )
    })?;

    let status = StatusCode::from_u16(upstream.status().as_u16())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let payload: serde_json::Value = upstream.json().await.map_err(|_| {
        GatewayError::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Authentication service unavailable",
        )
    })?;

    Ok((status, Json(payload)).into_response())
}

/// Tokens are stateless; logout needs no backend.
pub async fn logout() -> Response {
    http::message("Logout successful")
}
