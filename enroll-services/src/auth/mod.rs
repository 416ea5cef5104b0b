//! Auth service: login, register, token verification.
//!
//! The only service that holds the signing keys; every other service
//! defers to its verify endpoint.

pub mod service;

mod http;
mod rpc;

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use enroll_core::auth::{AuthVerifier, ProvideAuth};
use enroll_core::token::TokenKeys;
use enroll_core::{FailoverPool, ServiceError};

pub const SERVICE: &str = "auth-controller";

pub struct AuthState {
    pub db: FailoverPool,
    pub keys: Arc<TokenKeys>,
    verifier: AuthVerifier,
}

impl AuthState {
    pub fn new(db: FailoverPool, keys: Arc<TokenKeys>) -> Self {
        Self {
            db,
            verifier: AuthVerifier::local(keys.clone()),
            keys,
        }
    }
}

impl ProvideAuth for AuthState {
    fn auth_verifier(&self) -> &AuthVerifier {
        &self.verifier
    }

    fn service_name(&self) -> &'static str {
        SERVICE
    }
}

struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_envelope(SERVICE)
    }
}

pub fn router() -> Router<Arc<AuthState>> {
    Router::new()
        .route("/api/auth/login", post(http::login))
        .route("/api/auth/register", post(http::register))
        .route("/api/auth/verify", post(http::verify))
        .route("/api/auth/logout", post(http::logout))
        .route("/rpc/Login", post(rpc::login))
        .route("/rpc/ValidateToken", post(rpc::validate_token))
}
