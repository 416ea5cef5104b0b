//! Course and enrollment routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use enroll_core::http;
use enroll_core::rpc::messages::{
    EnrollRequest, EnrollResponse, GetCourseRequest, GetCourseResponse,
    ListEnrollmentsByStudentRequest, ListEnrollmentsByStudentResponse, ListOpenCoursesResponse,
};

use crate::auth::authenticate;
use crate::error::GatewayError;
use crate::state::GatewayState;

pub async fn list(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    authenticate(&state, &headers).await?;

    let resp: ListOpenCoursesResponse = state
        .rpc
        .call(&state.config.course_url, "ListOpenCourses", &serde_json::json!({}))
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch courses"))?;

    Ok(http::ok(resp.courses))
}

pub async fn get_by_id(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Path(id): Path<i64>,
) -> Result<Response, GatewayError> {
    authenticate(&state, &headers).await?;

    let resp: GetCourseResponse = state
        .rpc
        .call(
            &state.config.course_url,
            "GetCourse",
            &GetCourseRequest { course_id: id },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch course"))?;

    Ok(http::ok(resp.course))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollBody {
    #[serde(default)]
    course_id: Option<i64>,
}

pub async fn enroll(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<EnrollBody>,
) -> Result<Response, GatewayError> {
    // Token first, body second; anonymous callers never see validation.
    let user = authenticate(&state, &headers).await?;
    let Some(course_id) = body.course_id else {
        return Err(GatewayError::bad_request("courseId is required"));
    };

    let resp: EnrollResponse = state
        .rpc
        .call(
            &state.config.course_url,
            "Enroll",
            &EnrollRequest {
                user_id: user.user_id,
                role: user.role,
                course_id,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to enroll in course"))?;

    Ok(http::created(resp))
}

pub async fn my_enrollments(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: ListEnrollmentsByStudentResponse = state
        .rpc
        .call(
            &state.config.course_url,
            "ListEnrollmentsByStudent",
            &ListEnrollmentsByStudentRequest {
                user_id: user.user_id,
                role: user.role,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch enrollments"))?;

    Ok(http::ok(resp.enrollments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use crate::config::GatewayConfig;

    fn state() -> Arc<GatewayState> {
        Arc::new(GatewayState::new(GatewayConfig::from_lookup(|_| None)))
    }

    #[tokio::test]
    async fn anonymous_enroll_is_rejected_before_body_validation() {
        // No token and no courseId: the token check must win.
        let err = enroll(
            State(state()),
            HeaderMap::new(),
            Json(EnrollBody { course_id: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
