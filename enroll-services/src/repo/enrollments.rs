//! Enrollment rows. Enrolling is the one read-check-insert sequence in
//! the system, so it runs as a single transaction on the primary.

use chrono::{DateTime, Utc};
use sqlx::Row;

use enroll_core::rpc::messages::EnrollmentView;
use enroll_core::{DbError, FailoverPool};

#[derive(Debug, thiserror::Error)]
pub enum EnrollError {
    #[error("course not found")]
    CourseNotFound,

    #[error("course is not open for enrollment")]
    CourseClosed,

    #[error("course is full")]
    CourseFull,

    #[error("already enrolled")]
    AlreadyEnrolled,

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for EnrollError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(DbError::from(e))
    }
}

pub struct EnrollmentRepo<'a> {
    db: &'a FailoverPool,
}

impl<'a> EnrollmentRepo<'a> {
    pub fn new(db: &'a FailoverPool) -> Self {
        Self { db }
    }

    /// Enroll a student, atomically. The course row is locked for the
    /// duration so the capacity check and the insert see the same count;
    /// concurrent duplicate inserts collapse onto the unique constraint
    /// via ON CONFLICT DO NOTHING.
    pub async fn enroll(
        &self,
        student_id: i64,
        course_id: i64,
    ) -> Result<(i64, DateTime<Utc>), EnrollError> {
        let pool = self.db.write().await?;
        let mut tx = pool.begin().await?;

        let course = sqlx::query("SELECT status, max_students FROM courses WHERE id = $1 FOR UPDATE")
            .bind(course_id)
            .fetch_optional(&mut *tx)
            .await?;
        let course = course.ok_or(EnrollError::CourseNotFound)?;

        let status: String = course.get("status");
        if status != "open" {
            return Err(EnrollError::CourseClosed);
        }

        let max_students: i32 = course.get("max_students");
        let enrolled: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE course_id = $1")
                .bind(course_id)
                .fetch_one(&mut *tx)
                .await?;
        if enrolled >= i64::from(max_students) {
            return Err(EnrollError::CourseFull);
        }

        let inserted = sqlx::query(
            "INSERT INTO enrollments (student_id, course_id)
             VALUES ($1, $2)
             ON CONFLICT (student_id, course_id) DO NOTHING
             RETURNING id, enrolled_at",
        )
        .bind(student_id)
        .bind(course_id)
        .fetch_optional(&mut *tx)
        .await?;
        let inserted = inserted.ok_or(EnrollError::AlreadyEnrolled)?;

        tx.commit().await?;

        Ok((inserted.get("id"), inserted.get("enrolled_at")))
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<EnrollmentView>, DbError> {
        let pool = self.db.read().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                e.id AS enrollment_id, e.enrolled_at,
                c.id AS course_id, c.code, c.title, c.description,
                u.first_name AS faculty_first_name,
                u.last_name AS faculty_last_name
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            LEFT JOIN users u ON c.faculty_id = u.id
            WHERE e.student_id = $1
            ORDER BY e.enrolled_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| EnrollmentView {
                enrollment_id: r.get("enrollment_id"),
                course_id: r.get("course_id"),
                code: r.get("code"),
                title: r.get("title"),
                description: r.get("description"),
                faculty_first_name: r.get("faculty_first_name"),
                faculty_last_name: r.get("faculty_last_name"),
                enrolled_at: r.get("enrolled_at"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::config::DbConfig;
    use enroll_core::models::Role;

    use crate::repo::UserRepo;

    async fn test_pool() -> FailoverPool {
        let pool = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        crate::schema::ensure_schema(pool.primary()).await.unwrap();
        pool
    }

    async fn seed_course(db: &FailoverPool, code: &str, max_students: i32) -> i64 {
        sqlx::query_scalar(
            "INSERT INTO courses (code, title, status, max_students)
             VALUES ($1, 'Test Course', 'open', $2)
             RETURNING id",
        )
        .bind(code)
        .bind(max_students)
        .fetch_one(db.primary())
        .await
        .unwrap()
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_enroll_is_rejected() {
        let db = test_pool().await;
        let users = UserRepo::new(&db);
        let suffix = std::process::id();

        let student = users
            .create(
                &format!("enr-{suffix}@test.local"),
                "$argon2id$fake",
                Role::Student,
                None,
                None,
            )
            .await
            .unwrap();
        let course_id = seed_course(&db, &format!("ENR-{suffix}"), 10).await;

        let repo = EnrollmentRepo::new(&db);
        repo.enroll(student.id, course_id).await.unwrap();
        assert!(matches!(
            repo.enroll(student.id, course_id).await,
            Err(EnrollError::AlreadyEnrolled)
        ));

        let listed = repo.list_by_student(student.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].course_id, course_id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn full_course_is_rejected() {
        let db = test_pool().await;
        let users = UserRepo::new(&db);
        let suffix = format!("full-{}", std::process::id());

        let a = users
            .create(
                &format!("{suffix}-a@test.local"),
                "$argon2id$fake",
                Role::Student,
                None,
                None,
            )
            .await
            .unwrap();
        let b = users
            .create(
                &format!("{suffix}-b@test.local"),
                "$argon2id$fake",
                Role::Student,
                None,
                None,
            )
            .await
            .unwrap();
        let course_id = seed_course(&db, &format!("FULL-{}", std::process::id()), 1).await;

        let repo = EnrollmentRepo::new(&db);
        repo.enroll(a.id, course_id).await.unwrap();
        assert!(matches!(
            repo.enroll(b.id, course_id).await,
            Err(EnrollError::CourseFull)
        ));
    }
}
