//! Account service: student self-registration.
//!
//! Unlike the auth service's register endpoint, this one runs the full
//! field validator chain and hands back a session token immediately.

pub mod service;

mod http;
mod rpc;

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;

use enroll_core::token::TokenKeys;
use enroll_core::{FailoverPool, ServiceError};

pub const SERVICE: &str = "account-controller";

pub struct AccountState {
    pub db: FailoverPool,
    pub keys: Arc<TokenKeys>,
}

impl AccountState {
    pub fn new(db: FailoverPool, keys: Arc<TokenKeys>) -> Self {
        Self { db, keys }
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

pub fn router() -> Router<Arc<AccountState>> {
    Router::new()
        .route("/api/account/register", post(http::create_student))
        .route("/rpc/CreateStudent", post(rpc::create_student))
}
