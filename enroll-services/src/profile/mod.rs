//! Profile service: view and update the calling user's account.

pub mod service;

mod http;
mod rpc;

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::Router;

use enroll_core::auth::{AuthVerifier, ProvideAuth};
use enroll_core::token::TokenKeys;
use enroll_core::{FailoverPool, ServiceError};

pub const SERVICE: &str = "profile-controller";

pub struct ProfileState {
    pub db: FailoverPool,
    pub keys: Arc<TokenKeys>,
    verifier: AuthVerifier,
}

impl ProfileState {
    pub fn new(db: FailoverPool, keys: Arc<TokenKeys>, auth_service_url: String) -> Self {
        Self {
            db,
            keys,
            verifier: AuthVerifier::remote(auth_service_url),
        }
    }
}

impl ProvideAuth for ProfileState {
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

pub fn router() -> Router<Arc<ProfileState>> {
    Router::new()
        .route("/api/profile/me", get(http::get_profile))
        .route("/api/profile", put(http::update_profile))
        .route("/rpc/GetProfile", post(rpc::get_profile))
        .route("/rpc/UpdateProfile", post(rpc::update_profile))
}
