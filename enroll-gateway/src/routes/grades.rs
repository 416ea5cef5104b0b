//! Grade routes, student and faculty sides.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use enroll_core::http;
use enroll_core::rpc::messages::{
    BatchUploadGradesRequest, BatchUploadGradesResponse, GradeItem,
    ListEnrollmentsWithGradesRequest, ListEnrollmentsWithGradesResponse,
    ListGradesByStudentRequest, ListGradesRequest, ListGradesResponse, UploadGradeRequest,
    UploadGradeResponse,
};

use crate::auth::authenticate;
use crate::error::GatewayError;
use crate::state::GatewayState;

pub async fn my_grades(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: ListGradesResponse = state
        .rpc
        .call(
            &state.config.grade_url,
            "ListGrades",
            &ListGradesRequest {
                user_id: user.user_id,
                role: user.role,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch grades"))?;

    Ok(http::ok(resp.grades))
}

pub async fn student_grades(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Path(student_id): Path<i64>,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: ListGradesResponse = state
        .rpc
        .call(
            &state.config.grade_url,
            "ListGradesByStudent",
            &ListGradesByStudentRequest {
                student_id,
                requester_id: user.user_id,
                requester_role: user.role,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch grades"))?;

    Ok(http::ok(resp.grades))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
    #[serde(default)]
    enrollment_id: Option<i64>,
    #[serde(default)]
    grade: Option<String>,
    #[serde(default)]
    remarks: Option<String>,
}

pub async fn upload(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<UploadBody>,
) -> Result<Response, GatewayError> {
    // Token first, body second; anonymous callers never see validation.
    let user = authenticate(&state, &headers).await?;
    let (Some(enrollment_id), Some(grade)) = (body.enrollment_id, body.grade) else {
        return Err(GatewayError::bad_request("enrollmentId and grade are required"));
    };

    let resp: UploadGradeResponse = state
        .rpc
        .call(
            &state.config.grade_url,
            "UploadGrade",
            &UploadGradeRequest {
                faculty_id: user.user_id,
                role: user.role,
                enrollment_id,
                grade,
                remarks: body.remarks,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to upload grade"))?;

    Ok(http::created(resp.record))
}

#[derive(Deserialize)]
pub struct BatchBody {
    #[serde(default)]
    grades: Vec<GradeItem>,
}

pub async fn batch_upload(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
    Json(body): Json<BatchBody>,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: BatchUploadGradesResponse = state
        .rpc
        .call(
            &state.config.grade_url,
            "BatchUploadGrades",
            &BatchUploadGradesRequest {
                faculty_id: user.user_id,
                role: user.role,
                grades: body.grades,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to batch upload grades"))?;

    Ok(http::created(json!({
        "uploaded": resp.uploaded,
        "grades": resp.grades,
    })))
}

pub async fn faculty_enrollments(
    State(state): State<Arc<GatewayState>>,
    headers: HeaderMap,
) -> Result<Response, GatewayError> {
    let user = authenticate(&state, &headers).await?;

    let resp: ListEnrollmentsWithGradesResponse = state
        .rpc
        .call(
            &state.config.grade_url,
            "ListEnrollmentsWithGrades",
            &ListEnrollmentsWithGradesRequest {
                faculty_id: user.user_id,
                role: user.role,
            },
        )
        .await
        .map_err(|e| GatewayError::from_rpc(e, "Failed to fetch enrollments with grades"))?;

    Ok(http::ok(resp.enrollments))
}
