//! HTTP handlers for the course routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use enroll_core::auth::AuthUser;
use enroll_core::http;
use enroll_core::rpc::messages::EnrollRequest;

use super::{service, ApiError, CourseState};

pub async fn list_courses(
    State(state): State<Arc<CourseState>>,
    AuthUser(_): AuthUser,
) -> Result<Response, ApiError> {
    let courses = service::list_courses(&state).await?;
    Ok(http::ok(courses))
}

pub async fn get_course(
    State(state): State<Arc<CourseState>>,
    AuthUser(_): AuthUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let course = service::get_course(&state, id).await?;
    Ok(http::ok(course))
}

/// Body carries only the course; the student is whoever the token says.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
    #[serde(default)]
    course_id: Option<i64>,
}

pub async fn enroll(
    State(state): State<Arc<CourseState>>,
    AuthUser(claims): AuthUser,
    Json(body): Json<EnrollBody>,
) -> Result<Response, ApiError> {
    let resp = service::enroll(
        &state,
        EnrollRequest {
            user_id: claims.user_id,
            role: claims.role,
            course_id: body.course_id.unwrap_or(0),
        },
    )
    .await?;
    Ok(http::created(resp))
}

pub async fn my_enrollments(
    State(state): State<Arc<CourseState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, ApiError> {
    let enrollments = service::my_enrollments(&state, claims.user_id, claims.role).await?;
    Ok(http::ok(enrollments))
}
