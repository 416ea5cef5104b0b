//! Entity repositories over the failover pool.
//!
//! Every method resolves read or write access, runs one parameterized
//! statement, and returns typed rows. The two places that need
//! multi-statement atomicity (enroll, batch grade upload) run a single
//! transaction on the primary.

pub mod courses;
pub mod enrollments;
pub mod grades;
pub mod users;

pub use courses::CourseRepo;
pub use enrollments::{EnrollError, EnrollmentRepo};
pub use grades::{BatchError, GradeRepo};
pub use users::{UserRepo, UserRow};

use enroll_core::DbError;

/// Wrap a row-decoding failure (e.g. an unknown role value in the
/// database) as a database error.
pub(crate) fn decode_err(e: impl std::error::Error + Send + Sync + 'static) -> DbError {
    DbError::Sqlx(sqlx::Error::Decode(Box::new(e)))
}
