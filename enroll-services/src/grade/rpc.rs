//! RPC handlers for the grade methods.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use enroll_core::rpc::messages::{
    BatchUploadGradesRequest, BatchUploadGradesResponse, ListEnrollmentsWithGradesRequest,
    ListEnrollmentsWithGradesResponse, ListGradesByStudentRequest, ListGradesRequest,
    ListGradesResponse, UploadGradeRequest, UploadGradeResponse,
};
use enroll_core::rpc::RpcFault;

use super::{service, GradeState};

pub async fn list_grades(
    State(state): State<Arc<GradeState>>,
    Json(req): Json<ListGradesRequest>,
) -> Result<Json<ListGradesResponse>, RpcFault> {
    let grades = service::my_grades(&state, req.user_id, req.role).await?;
    Ok(Json(ListGradesResponse { grades }))
}

pub async fn list_grades_by_student(
    State(state): State<Arc<GradeState>>,
    Json(req): Json<ListGradesByStudentRequest>,
) -> Result<Json<ListGradesResponse>, RpcFault> {
    let grades = service::student_grades(&state, req).await?;
    Ok(Json(ListGradesResponse { grades }))
}

pub async fn upload_grade(
    State(state): State<Arc<GradeState>>,
    Json(req): Json<UploadGradeRequest>,
) -> Result<Json<UploadGradeResponse>, RpcFault> {
    let record = service::upload(&state, req).await?;
    Ok(Json(UploadGradeResponse { record }))
}

pub async fn batch_upload_grades(
    State(state): State<Arc<GradeState>>,
    Json(req): Json<BatchUploadGradesRequest>,
) -> Result<Json<BatchUploadGradesResponse>, RpcFault> {
    Ok(Json(service::batch_upload(&state, req).await?))
}

pub async fn list_enrollments_with_grades(
    State(state): State<Arc<GradeState>>,
    Json(req): Json<ListEnrollmentsWithGradesRequest>,
) -> Result<Json<ListEnrollmentsWithGradesResponse>, RpcFault> {
    let enrollments = service::faculty_enrollments(&state, req.faculty_id, req.role).await?;
    Ok(Json(ListEnrollmentsWithGradesResponse { enrollments }))
}
