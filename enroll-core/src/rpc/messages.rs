//! Request and response messages for the internal RPC surface.
//!
//! These are the shared wire contract between the gateway and the
//! backends, and double as the row shapes the repositories produce.
//! Requests use camelCase like the HTTP bodies they mirror; row shapes
//! keep the snake_case column aliases of the SQL that produces them,
//! which is what the frontend consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Role, UserPublic};
use crate::token::Claims;

// ---- auth-service ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub role: String,
    #[serde(rename = "firstName", default)]
    pub first_name: Option<String>,
    #[serde(rename = "lastName", default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateTokenResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Claims>,
}

// ---- account-service ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStudentRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateStudentResponse {
    pub user: UserPublic,
    pub token: String,
}

// ---- course-service ----

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOpenCoursesResponse {
    pub courses: Vec<CourseSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetCourseRequest {
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetCourseResponse {
    pub course: CourseDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub user_id: i64,
    pub role: Role,
    pub course_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollResponse {
    pub enrollment_id: i64,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnrollmentsByStudentRequest {
    pub user_id: i64,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnrollmentsByStudentResponse {
    pub enrollments: Vec<EnrollmentView>,
}

// ---- grade-service ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGradesRequest {
    pub user_id: i64,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListGradesResponse {
    pub grades: Vec<GradeView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListGradesByStudentRequest {
    pub student_id: i64,
    pub requester_id: i64,
    pub requester_role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadGradeRequest {
    pub faculty_id: i64,
    pub role: Role,
    pub enrollment_id: i64,
    pub grade: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadGradeResponse {
    pub record: GradeRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeItem {
    pub enrollment_id: i64,
    pub grade: String,
    #[serde(default)]
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchUploadGradesRequest {
    pub faculty_id: i64,
    pub role: Role,
    pub grades: Vec<GradeItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchUploadGradesResponse {
    pub uploaded: usize,
    pub grades: Vec<GradeRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnrollmentsWithGradesRequest {
    pub faculty_id: i64,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListEnrollmentsWithGradesResponse {
    pub enrollments: Vec<FacultyEnrollmentView>,
}

// ---- profile-service ----

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetProfileRequest {
    pub user_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetProfileResponse {
    pub user: UserPublic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub user_id: i64,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateProfileResponse {
    pub user: UserPublic,
    pub token: String,
}

// ---- row shapes ----

/// Course list row, decorated with instructor name and enrolled count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub max_students: i32,
    pub faculty_first_name: Option<String>,
    pub faculty_last_name: Option<String>,
    pub enrolled_count: i64,
}

/// Single-course row; adds the owning instructor's id and email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseDetail {
    pub id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub max_students: i32,
    pub faculty_id: Option<i64>,
    pub faculty_first_name: Option<String>,
    pub faculty_last_name: Option<String>,
    pub faculty_email: Option<String>,
    pub enrolled_count: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentView {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub code: String,
    pub title: String,
    pub description: Option<String>,
    pub faculty_first_name: Option<String>,
    pub faculty_last_name: Option<String>,
    pub enrolled_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeView {
    pub grade_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub grade: String,
    pub remarks: Option<String>,
    pub uploaded_at: DateTime<Utc>,
    pub faculty_first_name: Option<String>,
    pub faculty_last_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeRecord {
    pub id: i64,
    pub grade: String,
    pub remarks: Option<String>,
    pub uploaded_at: DateTime<Utc>,
}

/// Roster row for the faculty grading view; grade columns are null until
/// a grade is uploaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacultyEnrollmentView {
    pub enrollment_id: i64,
    pub course_id: i64,
    pub course_code: String,
    pub course_title: String,
    pub student_id: i64,
    pub student_first_name: Option<String>,
    pub student_last_name: Option<String>,
    pub student_email: String,
    pub enrolled_at: DateTime<Utc>,
    pub grade: Option<String>,
    pub remarks: Option<String>,
    pub uploaded_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_use_camel_case() {
        let req: EnrollRequest =
            serde_json::from_str(r#"{"userId": 1, "role": "student", "courseId": 2}"#).unwrap();
        assert_eq!(req.user_id, 1);
        assert_eq!(req.role, Role::Student);
        assert_eq!(req.course_id, 2);

        let v = serde_json::to_value(&UploadGradeRequest {
            faculty_id: 3,
            role: Role::Faculty,
            enrollment_id: 4,
            grade: "A".into(),
            remarks: None,
        })
        .unwrap();
        assert!(v.get("facultyId").is_some());
        assert!(v.get("enrollmentId").is_some());
    }

    #[test]
    fn row_shapes_stay_snake_case() {
        let row = CourseSummary {
            id: 1,
            code: "C101".into(),
            title: "Intro".into(),
            description: None,
            status: "open".into(),
            max_students: 2,
            faculty_first_name: Some("Grace".into()),
            faculty_last_name: Some("Hopper".into()),
            enrolled_count: 0,
        };
        let v = serde_json::to_value(&row).unwrap();
        assert!(v.get("faculty_first_name").is_some());
        assert!(v.get("enrolled_count").is_some());
    }

    #[test]
    fn optional_remarks_default() {
        let item: GradeItem = serde_json::from_str(r#"{"enrollmentId": 9, "grade": "B+"}"#).unwrap();
        assert_eq!(item.remarks, None);
    }
}
