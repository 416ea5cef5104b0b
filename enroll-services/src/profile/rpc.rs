//! RPC handlers for the profile methods.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use enroll_core::rpc::messages::{
    GetProfileRequest, GetProfileResponse, UpdateProfileRequest, UpdateProfileResponse,
};
use enroll_core::rpc::RpcFault;

use super::{service, ProfileState};

pub async fn get_profile(
    State(state): State<Arc<ProfileState>>,
    Json(req): Json<GetProfileRequest>,
) -> Result<Json<GetProfileResponse>, RpcFault> {
    let user = service::get_profile(&state, req.user_id).await?;
    Ok(Json(GetProfileResponse { user }))
}

pub async fn update_profile(
    State(state): State<Arc<ProfileState>>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UpdateProfileResponse>, RpcFault> {
    Ok(Json(service::update_profile(&state, req).await?))
}
