//! Grade service: upload, batch upload, and grade views.

pub mod service;

mod http;
mod rpc;

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use enroll_core::auth::{AuthVerifier, ProvideAuth};
use enroll_core::{FailoverPool, ServiceError};

pub const SERVICE: &str = "grade-controller";

pub struct GradeState {
    pub db: FailoverPool,
    verifier: AuthVerifier,
}

impl GradeState {
    pub fn new(db: FailoverPool, auth_service_url: String) -> Self {
        Self {
            db,
            verifier: AuthVerifier::remote(auth_service_url),
        }
    }
}

impl ProvideAuth for GradeState {
    fn auth_verifier(&self) -> &AuthVerifier {
        &self.verifier
    }

    fn service_name(&self) -> &'static str {
        SERVICE
    }
}

struct ApiError(ServiceError);

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.0.into_envelope(SERVICE)
    }
}

pub fn router() -> Router<Arc<GradeState>> {
    Router::new()
        .route("/api/grades/my", get(http::my_grades))
        .route("/api/grades/student/{studentId}", get(http::student_grades))
        .route("/api/grades/upload", post(http::upload))
        .route("/api/grades/batch-upload", post(http::batch_upload))
        .route("/api/grades/enrollments", get(http::faculty_enrollments))
        .route("/rpc/ListGrades", post(rpc::list_grades))
        .route("/rpc/ListGradesByStudent", post(rpc::list_grades_by_student))
        .route("/rpc/UploadGrade", post(rpc::upload_grade))
        .route("/rpc/BatchUploadGrades", post(rpc::batch_upload_grades))
        .route(
            "/rpc/ListEnrollmentsWithGrades",
            post(rpc::list_enrollments_with_grades),
        )
}
