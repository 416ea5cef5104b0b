//! HTTP handlers for the profile routes.

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use enroll_core::auth::AuthUser;
use enroll_core::http;
use enroll_core::rpc::messages::UpdateProfileRequest;

use super::{service, ApiError, ProfileState};

pub async fn get_profile(
    State(state): State<Arc<ProfileState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, ApiError> {
    let user = service::get_profile(&state, claims.user_id).await?;
    Ok(http::ok(json!({ "user": user })))
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

pub async fn update_profile(
    State(state): State<Arc<ProfileState>>,
    AuthUser(claims): AuthUser,
    Json(body): Json<UpdateBody>,
) -> Result<Response, ApiError> {
    let resp = service::update_profile(
        &state,
        UpdateProfileRequest {
            user_id: claims.user_id,
            email: body.email,
            password: body.password,
            first_name: body.first_name,
            last_name: body.last_name,
        },
    )
    .await?;
    Ok(http::ok(resp))
}
