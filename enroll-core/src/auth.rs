//! Bearer-token authentication for protected routes.
//!
//! The auth service verifies tokens against its own keys; every other
//! service forwards the header to the auth service's verify endpoint with
//! a short timeout.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::response::Response;
use serde::Deserialize;

use crate::error::ServiceError;
use crate::token::{Claims, TokenKeys};

const REMOTE_VERIFY_TIMEOUT: Duration = Duration::from_secs(5);

/// How a service turns an `Authorization` header into claims.
pub enum AuthVerifier {
    /// Decode locally with the shared keys (auth service only).
    Local(Arc<TokenKeys>),
    /// Ask the auth service's `/api/auth/verify` endpoint.
    Remote(RemoteVerifier),
}

impl AuthVerifier {
    pub fn local(keys: Arc<TokenKeys>) -> Self {
        Self::Local(keys)
    }

    pub fn remote(auth_service_url: String) -> Self {
        Self::Remote(RemoteVerifier {
            http: reqwest::Client::new(),
            base_url: auth_service_url,
        })
    }

    pub async fn verify_header(&self, header: Option<&str>) -> Result<Claims, ServiceError> {
        let header = header
            .filter(|h| h.starts_with("Bearer "))
            .ok_or_else(|| ServiceError::Unauthenticated("No token provided".into()))?;

        match self {
            Self::Local(keys) => {
                let token = &header["Bearer ".len()..];
                keys.verify(token)
                    .map_err(|_| ServiceError::Unauthenticated("Invalid or expired token".into()))
            }
            Self::Remote(remote) => remote.verify(header).await,
        }
    }
}

pub struct RemoteVerifier {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Deserialize)]
struct VerifyEnvelope {
    success: bool,
    #[serde(default)]
    data: Option<VerifyData>,
}

#[derive(Deserialize)]
struct VerifyData {
    user: Claims,
}

impl RemoteVerifier {
    async fn verify(&self, header: &str) -> Result<Claims, ServiceError> {
        let url = format!("{}/api/auth/verify", self.base_url.trim_end_matches('/'));
        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, header)
            .timeout(REMOTE_VERIFY_TIMEOUT)
            .send()
            .await;

        let response = match response {
            Ok(r) => r,
            Err(e) if e.is_connect() || e.is_timeout() => {
                tracing::error!(error = %e, "auth service unreachable");
                return Err(ServiceError::Unavailable(
                    "Authentication service unavailable".into(),
                ));
            }
            Err(_) => return Err(ServiceError::Unauthenticated("Authentication failed".into())),
        };

        if !response.status().is_success() {
            return Err(ServiceError::Unauthenticated("Invalid token".into()));
        }

        let envelope: VerifyEnvelope = response
            .json()
            .await
            .map_err(|_| ServiceError::Unauthenticated("Authentication failed".into()))?;

        match envelope.data {
            Some(data) if envelope.success => Ok(data.user),
            _ => Err(ServiceError::Unauthenticated("Invalid token".into())),
        }
    }
}

/// State hook for the [`AuthUser`] extractor.
pub trait ProvideAuth {
    fn auth_verifier(&self) -> &AuthVerifier;
    fn service_name(&self) -> &'static str;
}

impl<T: ProvideAuth> ProvideAuth for Arc<T> {
    fn auth_verifier(&self) -> &AuthVerifier {
        (**self).auth_verifier()
    }

    fn service_name(&self) -> &'static str {
        (**self).service_name()
    }
}

/// Extracts the verified claims of the calling user, or rejects with the
/// envelope-shaped 401/503.
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: ProvideAuth + Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());

        state
            .auth_verifier()
            .verify_header(header)
            .await
            .map(AuthUser)
            .map_err(|e| e.into_envelope(state.service_name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Role, UserPublic};

    fn keys() -> Arc<TokenKeys> {
        Arc::new(TokenKeys::new("test-secret"))
    }

    fn token() -> String {
        keys()
            .sign(&UserPublic {
                id: 1,
                email: "a@x.com".into(),
                role: Role::Student,
                first_name: "A".into(),
                last_name: "B".into(),
            })
            .unwrap()
    }

    #[tokio::test]
    async fn local_verify_accepts_bearer() {
        let verifier = AuthVerifier::local(keys());
        let header = format!("Bearer {}", token());
        let claims = verifier.verify_header(Some(&header)).await.unwrap();
        assert_eq!(claims.user_id, 1);
    }

    #[tokio::test]
    async fn missing_header_is_unauthenticated() {
        let verifier = AuthVerifier::local(keys());
        let err = verifier.verify_header(None).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn non_bearer_header_is_unauthenticated() {
        let verifier = AuthVerifier::local(keys());
        let err = verifier
            .verify_header(Some("Basic dXNlcjpwYXNz"))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthenticated(_)));
    }

    #[tokio::test]
    async fn remote_connect_failure_is_unavailable() {
        // Port 1 refuses connections immediately.
        let verifier = AuthVerifier::remote("http://127.0.0.1:1".into());
        let header = format!("Bearer {}", token());
        let err = verifier.verify_header(Some(&header)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }
}
