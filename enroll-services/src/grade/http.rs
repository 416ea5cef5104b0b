//! HTTP handlers for the grade routes.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use enroll_core::auth::AuthUser;
use enroll_core::http;
use enroll_core::rpc::messages::{
    BatchUploadGradesRequest, GradeItem, ListGradesByStudentRequest, UploadGradeRequest,
};

use super::{service, ApiError, GradeState};

pub async fn my_grades(
    State(state): State<Arc<GradeState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, ApiError> {
    let grades = service::my_grades(&state, claims.user_id, claims.role).await?;
    Ok(http::ok(grades))
}

pub async fn student_grades(
    State(state): State<Arc<GradeState>>,
    AuthUser(claims): AuthUser,
    Path(student_id): Path<i64>,
) -> Result<Response, ApiError> {
    let grades = service::student_grades(
        &state,
        ListGradesByStudentRequest {
            student_id,
            requester_id: claims.user_id,
            requester_role: claims.role,
        },
    )
    .await?;
    Ok(http::ok(grades))
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
    State(state): State<Arc<GradeState>>,
    AuthUser(claims): AuthUser,
    Json(body): Json<UploadBody>,
) -> Result<Response, ApiError> {
    let record = service::upload(
        &state,
        UploadGradeRequest {
            faculty_id: claims.user_id,
            role: claims.role,
            enrollment_id: body.enrollment_id.unwrap_or(0),
            grade: body.grade.unwrap_or_default(),
            remarks: body.remarks,
        },
    )
    .await?;
    Ok(http::created(record))
}

#[derive(Deserialize)]
pub struct BatchBody {
    #[serde(default)]
    grades: Vec<GradeItem>,
}

pub async fn batch_upload(
    State(state): State<Arc<GradeState>>,
    AuthUser(claims): AuthUser,
    Json(body): Json<BatchBody>,
) -> Result<Response, ApiError> {
    let resp = service::batch_upload(
        &state,
        BatchUploadGradesRequest {
            faculty_id: claims.user_id,
            role: claims.role,
            grades: body.grades,
        },
    )
    .await?;
    Ok(http::created(json!({
        "uploaded": resp.uploaded,
        "grades": resp.grades,
    })))
}

pub async fn faculty_enrollments(
    State(state): State<Arc<GradeState>>,
    AuthUser(claims): AuthUser,
) -> Result<Response, ApiError> {
    let enrollments = service::faculty_enrollments(&state, claims.user_id, claims.role).await?;
    Ok(http::ok(enrollments))
}
