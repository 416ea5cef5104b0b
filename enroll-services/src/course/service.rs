//! Course and enrollment business rules.

use enroll_core::models::Role;
use enroll_core::rpc::messages::{CourseDetail, CourseSummary, EnrollRequest, EnrollResponse, EnrollmentView};
use enroll_core::ServiceError;

use crate::repo::{CourseRepo, EnrollError, EnrollmentRepo};

use super::CourseState;

pub async fn list_courses(state: &CourseState) -> Result<Vec<CourseSummary>, ServiceError> {
    Ok(CourseRepo::new(&state.db).list_all().await?)
}

pub async fn get_course(state: &CourseState, course_id: i64) -> Result<CourseDetail, ServiceError> {
    CourseRepo::new(&state.db)
        .find_by_id(course_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Course not found".into()))
}

/// Enroll the calling student. The role gate comes before any lookup so a
/// faculty caller learns nothing about the course.
pub async fn enroll(state: &CourseState, req: EnrollRequest) -> Result<EnrollResponse, ServiceError> {
    if req.role != Role::Student {
        return Err(ServiceError::Forbidden(
            "Only students can enroll in courses".into(),
        ));
    }
    if req.course_id <= 0 {
        return Err(ServiceError::validation("Course ID is required"));
    }

    let (enrollment_id, enrolled_at) = EnrollmentRepo::new(&state.db)
        .enroll(req.user_id, req.course_id)
        .await
        .map_err(map_enroll)?;

    tracing::info!(
        student_id = req.user_id,
        course_id = req.course_id,
        enrollment_id,
        "student enrolled"
    );
    Ok(EnrollResponse {
        enrollment_id,
        enrolled_at,
    })
}

pub async fn my_enrollments(
    state: &CourseState,
    user_id: i64,
    role: Role,
) -> Result<Vec<EnrollmentView>, ServiceError> {
    if role != Role::Student {
        return Err(ServiceError::Forbidden(
            "Only students can view enrollments".into(),
        ));
    }
    Ok(EnrollmentRepo::new(&state.db).list_by_student(user_id).await?)
}

fn map_enroll(e: EnrollError) -> ServiceError {
    match e {
        EnrollError::CourseNotFound => ServiceError::NotFound("Course not found".into()),
        EnrollError::CourseClosed => {
            ServiceError::validation("Course is not open for enrollment")
        }
        EnrollError::CourseFull => ServiceError::validation("Course is full"),
        EnrollError::AlreadyEnrolled => {
            ServiceError::Conflict("Already enrolled in this course".into())
        }
        EnrollError::Db(e) => ServiceError::Db(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use enroll_core::config::DbConfig;
    use enroll_core::FailoverPool;

    fn state() -> CourseState {
        let db = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        CourseState::new(db, "http://localhost:4001".into())
    }

    #[tokio::test]
    async fn faculty_cannot_enroll() {
        let err = enroll(
            &state(),
            EnrollRequest {
                user_id: 1,
                role: Role::Faculty,
                course_id: 2,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Only students can enroll in courses");
    }

    #[tokio::test]
    async fn missing_course_id_is_rejected() {
        let err = enroll(
            &state(),
            EnrollRequest {
                user_id: 1,
                role: Role::Student,
                course_id: 0,
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "Course ID is required");
    }

    #[tokio::test]
    async fn faculty_cannot_list_student_enrollments() {
        let err = my_enrollments(&state(), 1, Role::Faculty).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
    }

    #[test]
    fn enroll_errors_map_to_client_messages() {
        assert_eq!(
            map_enroll(EnrollError::CourseClosed).to_string(),
            "Course is not open for enrollment"
        );
        assert_eq!(map_enroll(EnrollError::CourseFull).to_string(), "Course is full");
        assert_eq!(
            map_enroll(EnrollError::AlreadyEnrolled).to_string(),
            "Already enrolled in this course"
        );
        assert!(matches!(
            map_enroll(EnrollError::CourseNotFound),
            ServiceError::NotFound(_)
        ));
    }
}
