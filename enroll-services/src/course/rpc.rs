//! RPC handlers for the course methods.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;

use enroll_core::rpc::messages::{
    EnrollRequest, EnrollResponse, GetCourseRequest, GetCourseResponse,
    ListEnrollmentsByStudentRequest, ListEnrollmentsByStudentResponse, ListOpenCoursesResponse,
};
use enroll_core::rpc::RpcFault;

use super::{service, CourseState};

pub async fn list_open_courses(
    State(state): State<Arc<CourseState>>,
) -> Result<Json<ListOpenCoursesResponse>, RpcFault> {
    let courses = service::list_courses(&state).await?;
    Ok(Json(ListOpenCoursesResponse { courses }))
}

pub async fn get_course(
    State(state): State<Arc<CourseState>>,
    Json(req): Json<GetCourseRequest>,
) -> Result<Json<GetCourseResponse>, RpcFault> {
    let course = service::get_course(&state, req.course_id).await?;
    Ok(Json(GetCourseResponse { course }))
}

pub async fn enroll(
    State(state): State<Arc<CourseState>>,
    Json(req): Json<EnrollRequest>,
) -> Result<Json<EnrollResponse>, RpcFault> {
    Ok(Json(service::enroll(&state, req).await?))
}

pub async fn list_enrollments_by_student(
    State(state): State<Arc<CourseState>>,
    Json(req): Json<ListEnrollmentsByStudentRequest>,
) -> Result<Json<ListEnrollmentsByStudentResponse>, RpcFault> {
    let enrollments = service::my_enrollments(&state, req.user_id, req.role).await?;
    Ok(Json(ListEnrollmentsByStudentResponse { enrollments }))
}
