//! Gateway route table. Handlers validate the caller's token, fan out to
//! the owning backend over RPC, and reshape into the client envelope.

mod account;
mod auth;
mod courses;
mod grades;
mod health;
mod profile;

use std::sync::Arc;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::GatewayState;

pub fn router() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/account/register", post(account::register))
        .route("/api/courses", get(courses::list))
        .route("/api/courses/{id}", get(courses::get_by_id))
        .route("/api/enrollments", post(courses::enroll))
        .route("/api/enrollments/my", get(courses::my_enrollments))
        .route("/api/grades/my", get(grades::my_grades))
        .route("/api/grades/student/{studentId}", get(grades::student_grades))
        .route("/api/grades/upload", post(grades::upload))
        .route("/api/grades/batch-upload", post(grades::batch_upload))
        .route("/api/grades/enrollments", get(grades::faculty_enrollments))
        .route("/api/profile/me", get(profile::me))
        .route("/api/profile", put(profile::update))
        .route("/health", get(health::check))
}
