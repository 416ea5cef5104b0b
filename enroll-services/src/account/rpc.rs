//! RPC handler for the account methods.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use enroll_core::rpc::messages::{CreateStudentRequest, CreateStudentResponse};
use enroll_core::rpc::RpcFault;

use super::{service, AccountState};

pub async fn create_student(
    State(state): State<Arc<AccountState>>,
    Json(req): Json<CreateStudentRequest>,
) -> Result<Json<CreateStudentResponse>, RpcFault> {
    Ok(Json(service::create_student(&state, req).await?))
}
