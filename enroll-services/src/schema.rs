//! Schema setup, run by every service binary at startup.
//!
//! Statements are idempotent so services can start in any order against
//! the shared database. The `(student_id, course_id)` unique constraint is
//! the authoritative duplicate-enrollment guard; `grades.enrollment_id`
//! being unique is what makes grade upload an upsert.

use sqlx::PgPool;

static SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id            BIGSERIAL PRIMARY KEY,
        email         TEXT UNIQUE NOT NULL,
        password_hash TEXT NOT NULL,
        role          TEXT NOT NULL CHECK (role IN ('student', 'faculty')),
        first_name    TEXT,
        last_name     TEXT,
        created_at    TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
    "CREATE TABLE IF NOT EXISTS courses (
        id           BIGSERIAL PRIMARY KEY,
        code         TEXT UNIQUE NOT NULL,
        title        TEXT NOT NULL,
        description  TEXT,
        status       TEXT NOT NULL DEFAULT 'open' CHECK (status IN ('open', 'closed')),
        max_students INTEGER NOT NULL,
        faculty_id   BIGINT REFERENCES users(id)
    )",
    "CREATE TABLE IF NOT EXISTS enrollments (
        id          BIGSERIAL PRIMARY KEY,
        student_id  BIGINT NOT NULL REFERENCES users(id),
        course_id   BIGINT NOT NULL REFERENCES courses(id),
        enrolled_at TIMESTAMPTZ NOT NULL DEFAULT now(),
        UNIQUE (student_id, course_id)
    )",
    "CREATE TABLE IF NOT EXISTS grades (
        id            BIGSERIAL PRIMARY KEY,
        enrollment_id BIGINT UNIQUE NOT NULL REFERENCES enrollments(id),
        grade         TEXT NOT NULL,
        remarks       TEXT,
        uploaded_by   BIGINT REFERENCES users(id),
        uploaded_at   TIMESTAMPTZ NOT NULL DEFAULT now()
    )",
];

pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in SCHEMA {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use enroll_core::config::DbConfig;
    use enroll_core::FailoverPool;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn schema_is_idempotent() {
        let pool = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        ensure_schema(pool.primary()).await.unwrap();
        ensure_schema(pool.primary()).await.unwrap();
    }
}
