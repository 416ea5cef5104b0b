//! Grade rows. One grade per enrollment; uploading again replaces the
//! earlier record. Batch upload is all-or-nothing in one transaction.

use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, Row};

use enroll_core::rpc::messages::{FacultyEnrollmentView, GradeItem, GradeRecord, GradeView};
use enroll_core::{DbError, FailoverPool};

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("enrollment {0} not found")]
    ItemNotFound(i64),

    #[error("not authorized for enrollment {0}")]
    NotOwner(i64),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for BatchError {
    fn from(e: sqlx::Error) -> Self {
        Self::Db(DbError::from(e))
    }
}

/// Ownership facts for a single enrollment.
#[derive(Debug, Clone)]
pub struct EnrollmentDetails {
    pub id: i64,
    pub student_id: i64,
    pub faculty_id: Option<i64>,
    pub course_code: String,
}

pub struct GradeRepo<'a> {
    db: &'a FailoverPool,
}

impl<'a> GradeRepo<'a> {
    pub fn new(db: &'a FailoverPool) -> Self {
        Self { db }
    }

    pub async fn enrollment_details(
        &self,
        enrollment_id: i64,
    ) -> Result<Option<EnrollmentDetails>, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query(
            "SELECT e.id, e.student_id, c.faculty_id, c.code
             FROM enrollments e
             JOIN courses c ON e.course_id = c.id
             WHERE e.id = $1",
        )
        .bind(enrollment_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| EnrollmentDetails {
            id: r.get("id"),
            student_id: r.get("student_id"),
            faculty_id: r.get("faculty_id"),
            course_code: r.get("code"),
        }))
    }

    /// Insert or replace the grade for an enrollment.
    pub async fn upsert(
        &self,
        enrollment_id: i64,
        grade: &str,
        remarks: Option<&str>,
        uploaded_by: i64,
    ) -> Result<GradeRecord, DbError> {
        let pool = self.db.write().await?;
        let row = upsert_on(pool, enrollment_id, grade, remarks, uploaded_by).await?;
        Ok(record_from_row(&row))
    }

    /// Upload a set of grades atomically. Every enrollment is checked for
    /// existence and ownership before anything is written; the first
    /// failing item aborts the whole batch.
    pub async fn batch_upsert(
        &self,
        faculty_id: i64,
        items: &[GradeItem],
    ) -> Result<Vec<GradeRecord>, BatchError> {
        let pool = self.db.write().await?;
        let mut tx = pool.begin().await?;

        let mut records = Vec::with_capacity(items.len());
        for item in items {
            let owner: Option<Option<i64>> = sqlx::query_scalar(
                "SELECT c.faculty_id
                 FROM enrollments e
                 JOIN courses c ON e.course_id = c.id
                 WHERE e.id = $1",
            )
            .bind(item.enrollment_id)
            .fetch_optional(&mut *tx)
            .await?;

            match owner {
                None => return Err(BatchError::ItemNotFound(item.enrollment_id)),
                Some(owner) if owner != Some(faculty_id) => {
                    return Err(BatchError::NotOwner(item.enrollment_id))
                }
                Some(_) => {}
            }

            let row = upsert_on(
                &mut *tx,
                item.enrollment_id,
                &item.grade,
                item.remarks.as_deref(),
                faculty_id,
            )
            .await?;
            records.push(record_from_row(&row));
        }

        tx.commit().await?;
        Ok(records)
    }

    pub async fn list_by_student(&self, student_id: i64) -> Result<Vec<GradeView>, DbError> {
        let pool = self.db.read().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                g.id AS grade_id, g.grade, g.remarks, g.uploaded_at,
                c.id AS course_id, c.code AS course_code, c.title AS course_title,
                u.first_name AS faculty_first_name,
                u.last_name AS faculty_last_name
            FROM grades g
            JOIN enrollments e ON g.enrollment_id = e.id
            JOIN courses c ON e.course_id = c.id
            LEFT JOIN users u ON c.faculty_id = u.id
            WHERE e.student_id = $1
            ORDER BY g.uploaded_at DESC
            "#,
        )
        .bind(student_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| GradeView {
                grade_id: r.get("grade_id"),
                course_id: r.get("course_id"),
                course_code: r.get("course_code"),
                course_title: r.get("course_title"),
                grade: r.get("grade"),
                remarks: r.get("remarks"),
                uploaded_at: r.get("uploaded_at"),
                faculty_first_name: r.get("faculty_first_name"),
                faculty_last_name: r.get("faculty_last_name"),
            })
            .collect())
    }

    /// Roster for a faculty member's courses, one row per enrollment,
    /// with the grade columns null until a grade exists.
    pub async fn list_faculty_enrollments(
        &self,
        faculty_id: i64,
    ) -> Result<Vec<FacultyEnrollmentView>, DbError> {
        let pool = self.db.read().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                e.id AS enrollment_id, e.enrolled_at,
                c.id AS course_id, c.code AS course_code, c.title AS course_title,
                s.id AS student_id,
                s.first_name AS student_first_name,
                s.last_name AS student_last_name,
                s.email AS student_email,
                g.grade, g.remarks, g.uploaded_at
            FROM enrollments e
            JOIN courses c ON e.course_id = c.id
            JOIN users s ON e.student_id = s.id
            LEFT JOIN grades g ON g.enrollment_id = e.id
            WHERE c.faculty_id = $1
            ORDER BY c.code, s.last_name, s.first_name
            "#,
        )
        .bind(faculty_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .iter()
            .map(|r| FacultyEnrollmentView {
                enrollment_id: r.get("enrollment_id"),
                course_id: r.get("course_id"),
                course_code: r.get("course_code"),
                course_title: r.get("course_title"),
                student_id: r.get("student_id"),
                student_first_name: r.get("student_first_name"),
                student_last_name: r.get("student_last_name"),
                student_email: r.get("student_email"),
                enrolled_at: r.get("enrolled_at"),
                grade: r.get("grade"),
                remarks: r.get("remarks"),
                uploaded_at: r.get("uploaded_at"),
            })
            .collect())
    }
}

async fn upsert_on<'e, E: PgExecutor<'e>>(
    executor: E,
    enrollment_id: i64,
    grade: &str,
    remarks: Option<&str>,
    uploaded_by: i64,
) -> Result<PgRow, sqlx::Error> {
    sqlx::query(
        "INSERT INTO grades (enrollment_id, grade, remarks, uploaded_by)
         VALUES ($1, $2, $3, $4)
         ON CONFLICT (enrollment_id) DO UPDATE SET
             grade = EXCLUDED.grade,
             remarks = EXCLUDED.remarks,
             uploaded_by = EXCLUDED.uploaded_by,
             uploaded_at = now()
         RETURNING id, grade, remarks, uploaded_at",
    )
    .bind(enrollment_id)
    .bind(grade)
    .bind(remarks)
    .bind(uploaded_by)
    .fetch_one(executor)
    .await
}

fn record_from_row(row: &PgRow) -> GradeRecord {
    GradeRecord {
        id: row.get("id"),
        grade: row.get("grade"),
        remarks: row.get("remarks"),
        uploaded_at: row.get("uploaded_at"),
    }
}
