//! Course rows, decorated with instructor name and enrolled count.

use sqlx::postgres::PgRow;
use sqlx::Row;

use enroll_core::rpc::messages::{CourseDetail, CourseSummary};
use enroll_core::{DbError, FailoverPool};

pub struct CourseRepo<'a> {
    db: &'a FailoverPool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(db: &'a FailoverPool) -> Self {
        Self { db }
    }

    /// All courses with instructor name and enrolled count, ordered by
    /// code. Single query; the counts come from a LEFT JOIN.
    pub async fn list_all(&self) -> Result<Vec<CourseSummary>, DbError> {
        let pool = self.db.read().await?;
        let rows = sqlx::query(
            r#"
            SELECT
                c.id, c.code, c.title, c.description, c.status, c.max_students,
                u.first_name AS faculty_first_name, u.last_name AS faculty_last_name,
                COUNT(e.id) AS enrolled_count
            FROM courses c
            LEFT JOIN users u ON c.faculty_id = u.id
            LEFT JOIN enrollments e ON c.id = e.course_id
            GROUP BY c.id, u.first_name, u.last_name
            ORDER BY c.code
            "#,
        )
        .fetch_all(pool)
        .await?;

        Ok(rows.iter().map(summary_from_row).collect())
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<CourseDetail>, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query(
            r#"
            SELECT
                c.id, c.code, c.title, c.description, c.status, c.max_students,
                c.faculty_id,
                u.first_name AS faculty_first_name,
                u.last_name AS faculty_last_name,
                u.email AS faculty_email,
                COUNT(e.id) AS enrolled_count
            FROM courses c
            LEFT JOIN users u ON c.faculty_id = u.id
            LEFT JOIN enrollments e ON c.id = e.course_id
            WHERE c.id = $1
            GROUP BY c.id, u.first_name, u.last_name, u.email
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| CourseDetail {
            id: r.get("id"),
            code: r.get("code"),
            title: r.get("title"),
            description: r.get("description"),
            status: r.get("status"),
            max_students: r.get("max_students"),
            faculty_id: r.get("faculty_id"),
            faculty_first_name: r.get("faculty_first_name"),
            faculty_last_name: r.get("faculty_last_name"),
            faculty_email: r.get("faculty_email"),
            enrolled_count: r.get("enrolled_count"),
        }))
    }
}

fn summary_from_row(r: &PgRow) -> CourseSummary {
    CourseSummary {
        id: r.get("id"),
        code: r.get("code"),
        title: r.get("title"),
        description: r.get("description"),
        status: r.get("status"),
        max_students: r.get("max_students"),
        faculty_first_name: r.get("faculty_first_name"),
        faculty_last_name: r.get("faculty_last_name"),
        enrolled_count: r.get("enrolled_count"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::config::DbConfig;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn missing_course_is_none() {
        let db = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        crate::schema::ensure_schema(db.primary()).await.unwrap();
        let repo = CourseRepo::new(&db);
        assert!(repo.find_by_id(i64::MAX).await.unwrap().is_none());
    }
}
