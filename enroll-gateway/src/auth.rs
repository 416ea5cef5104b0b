//! Token validation in front of the protected routes.

use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;

use enroll_core::rpc::messages::{ValidateTokenRequest, ValidateTokenResponse};
use enroll_core::token::Claims;

use crate::error::GatewayError;
use crate::state::GatewayState;

pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

/// Resolve the caller's claims through the auth service. Any failure,
/// including an unreachable auth service, reads as 401 to the client.
pub async fn authenticate(
    state: &GatewayState,
    headers: &HeaderMap,
) -> Result<Claims, GatewayError> {
    let token = bearer_token(headers).ok_or_else(|| GatewayError::unauthorized("Missing token"))?;

    let resp: ValidateTokenResponse = state
        .rpc
        .call(
            &state.config.auth_url,
            "ValidateToken",
            &ValidateTokenRequest {
                token: token.to_owned(),
            },
        )
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "token validation failed");
            GatewayError::unauthorized("Unauthorized")
        })?;

    match resp.user {
        Some(user) if resp.valid => Ok(user),
        _ => Err(GatewayError::unauthorized("Unauthorized")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn extracts_bearer_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));
    }

    #[test]
    fn rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcg=="));
        assert_eq!(bearer_token(&headers), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn unreachable_auth_service_reads_as_unauthorized() {
        let state = GatewayState::new(crate::config::GatewayConfig::from_lookup(|k| {
            (k == "AUTH_SERVICE_URL").then(|| "http://127.0.0.1:1".to_string())
        }));
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        let err = authenticate(&state, &headers).await.unwrap_err();
        let resp = axum::response::IntoResponse::into_response(err);
        assert_eq!(resp.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
