//! HTTP handlers for the auth routes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use enroll_core::auth::AuthUser;
use enroll_core::http;
use enroll_core::rpc::messages::{LoginRequest, RegisterRequest};

use super::{service, ApiError, AuthState};

pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Response, ApiError> {
    let resp = service::login(&state, req).await?;
    Ok(http::ok(resp))
}

pub async fn register(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<Response, ApiError> {
    let user = service::register(&state, req).await?;
    Ok(http::created(json!({ "user": user })))
}

/// Token check for the other services' middleware. The extractor does the
/// verification; reaching the handler body means the token is good.
pub async fn verify(AuthUser(claims): AuthUser) -> Response {
    http::ok(json!({ "valid": true, "user": claims }))
}

/// Tokens are stateless, so logout is client-side. The endpoint exists so
/// the frontend has something to call.
pub async fn logout() -> Response {
    http::message("Logout successful")
}
