//! Account route: public student registration.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;

use enroll_core::http;
use enroll_core::rpc::messages::{CreateStudentRequest, CreateStudentResponse};

use crate::error::GatewayError;
use crate::state::GatewayState;

pub async fn register(
    State(state): State<Arc<GatewayState>>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<Response, GatewayError> {
    let resp: CreateStudentResponse = state
        .rpc
        .call(&state.config.account_url, "CreateStudent", &req)
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Account service unavailable"))?;

    Ok(http::created(resp))
}
