//! Course service: catalog and enrollment.

pub mod service;

mod http;
mod rpc;

use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use enroll_core::auth::{AuthVerifier, ProvideAuth};
use enroll_core::{FailoverPool, ServiceError};

pub const SERVICE: &str = "course-controller";

pub struct CourseState {
    pub db: FailoverPool,
    verifier: AuthVerifier,
}

impl CourseState {
    pub fn new(db: FailoverPool, auth_service_url: String) -> Self {
        Self {
            db,
            verifier: AuthVerifier::remote(auth_service_url),
        }
    }
}

impl ProvideAuth for CourseState {
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

pub fn router() -> Router<Arc<CourseState>> {
    Router::new()
        .route("/api/courses", get(http::list_courses))
        .route("/api/courses/{id}", get(http::get_course))
        .route("/api/enrollments", post(http::enroll))
        .route("/api/enrollments/my", get(http::my_enrollments))
        .route("/rpc/ListOpenCourses", post(rpc::list_open_courses))
        .route("/rpc/GetCourse", post(rpc::get_course))
        .route("/rpc/Enroll", post(rpc::enroll))
        .route(
            "/rpc/ListEnrollmentsByStudent",
            post(rpc::list_enrollments_by_student),
        )
}
