//! Grade business rules: ownership checks and upsert semantics.

use enroll_core::models::Role;
use enroll_core::rpc::messages::{
    BatchUploadGradesRequest, BatchUploadGradesResponse, FacultyEnrollmentView, GradeRecord,
    GradeView, ListGradesByStudentRequest, UploadGradeRequest,
};
use enroll_core::ServiceError;

use crate::repo::{BatchError, GradeRepo};

use super::GradeState;

pub async fn my_grades(
    state: &GradeState,
    user_id: i64,
    role: Role,
) -> Result<Vec<GradeView>, ServiceError> {
    if role != Role::Student {
        return Err(ServiceError::Forbidden(
            "Only students can view grades".into(),
        ));
    }
    Ok(GradeRepo::new(&state.db).list_by_student(user_id).await?)
}

/// Faculty may view any student's grades; a student only their own.
pub async fn student_grades(
    state: &GradeState,
    req: ListGradesByStudentRequest,
) -> Result<Vec<GradeView>, ServiceError> {
    if req.requester_role == Role::Student && req.requester_id != req.student_id {
        return Err(ServiceError::Forbidden(
            "You can only view your own grades".into(),
        ));
    }
    Ok(GradeRepo::new(&state.db)
        .list_by_student(req.student_id)
        .await?)
}

pub async fn upload(
    state: &GradeState,
    req: UploadGradeRequest,
) -> Result<GradeRecord, ServiceError> {
    if req.role != Role::Faculty {
        return Err(ServiceError::Forbidden(
            "Only faculty can upload grades".into(),
        ));
    }
    if req.enrollment_id <= 0 || req.grade.is_empty() {
        return Err(ServiceError::validation(
            "Enrollment ID and grade are required",
        ));
    }

    let repo = GradeRepo::new(&state.db);
    let enrollment = repo
        .enrollment_details(req.enrollment_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Enrollment not found".into()))?;
    if enrollment.faculty_id != Some(req.faculty_id) {
        return Err(ServiceError::Forbidden(
            "You can only upload grades for your own courses".into(),
        ));
    }

    let record = repo
        .upsert(
            req.enrollment_id,
            &req.grade,
            req.remarks.as_deref(),
            req.faculty_id,
        )
        .await?;

    tracing::info!(
        faculty_id = req.faculty_id,
        enrollment_id = req.enrollment_id,
        "grade uploaded"
    );
    Ok(record)
}

/// All items land or none do. The repository runs the whole batch in one
/// transaction and names the offending enrollment on failure.
pub async fn batch_upload(
    state: &GradeState,
    req: BatchUploadGradesRequest,
) -> Result<BatchUploadGradesResponse, ServiceError> {
    if req.role != Role::Faculty {
        return Err(ServiceError::Forbidden(
            "Only faculty can upload grades".into(),
        ));
    }
    if req.grades.is_empty() {
        return Err(ServiceError::validation("Grades array is required"));
    }

    let grades = GradeRepo::new(&state.db)
        .batch_upsert(req.faculty_id, &req.grades)
        .await
        .map_err(map_batch)?;

    tracing::info!(
        faculty_id = req.faculty_id,
        uploaded = grades.len(),
        "grades batch uploaded"
    );
    Ok(BatchUploadGradesResponse {
        uploaded: grades.len(),
        grades,
    })
}

pub async fn faculty_enrollments(
    state: &GradeState,
    faculty_id: i64,
    role: Role,
) -> Result<Vec<FacultyEnrollmentView>, ServiceError> {
    if role != Role::Faculty {
        return Err(ServiceError::Forbidden(
            "Only faculty can view enrollments".into(),
        ));
    }
    Ok(GradeRepo::new(&state.db)
        .list_faculty_enrollments(faculty_id)
        .await?)
}

fn map_batch(e: BatchError) -> ServiceError {
    match e {
        BatchError::ItemNotFound(id) => {
            ServiceError::NotFound(format!("Enrollment {id} not found"))
        }
        BatchError::NotOwner(id) => {
            ServiceError::Forbidden(format!("Not authorized for enrollment {id}"))
        }
        BatchError::Db(e) => ServiceError::Db(e),
    }
}
