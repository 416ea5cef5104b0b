//! RPC handlers for the auth methods.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use enroll_core::rpc::messages::{
    LoginRequest, LoginResponse, ValidateTokenRequest, ValidateTokenResponse,
};
use enroll_core::rpc::RpcFault;

use super::{service, AuthState};

pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, RpcFault> {
    Ok(Json(service::login(&state, req).await?))
}

/// Always answers 200; an invalid token is a `valid: false` payload, not
/// an error.
pub async fn validate_token(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<ValidateTokenRequest>,
) -> Json<ValidateTokenResponse> {
    match service::validate_token(&state, &req.token) {
        Ok(claims) => Json(ValidateTokenResponse {
            valid: true,
            user: Some(claims),
        }),
        Err(_) => Json(ValidateTokenResponse {
            valid: false,
            user: None,
        }),
    }
}
