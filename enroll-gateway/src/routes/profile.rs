//! Profile routes.

use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use enroll_core::http;
use enroll_core::rpc::messages::{
    GetProfileRequest, GetProfileResponse, UpdateProfileRequest, UpdateProfileResponse,
};

use crate::auth::authenticate;
use crate::error::GatewayError;
use crate::state::GatewayState;

pub async fn me(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: GetProfileResponse = state
        .rpc
        .call(
            &state.config.profile_url,
            "GetProfile",
            &GetProfileRequest {
                user_id: user.user_id,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch profile"))?;

    Ok(http::ok(json!({ "user": resp.user })))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
}

pub async fn update(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<UpdateBody>,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: UpdateProfileResponse = state
        .rpc
        .call(
            &state.config.profile_url,
            "UpdateProfile",
            &UpdateProfileRequest {
                user_id: user.user_id,
                email: body.email,
                password: body.password,
                first_name: body.first_name,
                last_name: body.last_name,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to update profile"))?;

    Ok(http::ok(resp))
}
