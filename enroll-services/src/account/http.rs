//! HTTP handler for the account routes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use enroll_core::http;
use enroll_core::rpc::messages::CreateStudentRequest;

use super::{service, AccountState, ApiError};

pub async fn create_student(
    State(state): State<Arc<AccountState>>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<Response, ApiError> {
    let resp = service::create_student(&state, req).await?;
    Ok(http::created(resp))
}
