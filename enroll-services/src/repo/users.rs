//! User rows: lookups, existence checks, insert, partial update.

use sqlx::postgres::PgRow;
use sqlx::Row;

use enroll_core::models::{Role, UserPublic};
use enroll_core::{DbError, FailoverPool};

use super::decode_err;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserRow {
    /// The client-facing shape; missing names become empty strings.
    pub fn public(&self) -> UserPublic {
        UserPublic {
            id: self.id,
            email: self.email.clone(),
            role: self.role,
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
        }
    }
}

fn user_from_row(row: &PgRow) -> Result<UserRow, DbError> {
    let role: String = row.get("role");
    Ok(UserRow {
        id: row.get("id"),
        email: row.get("email"),
        password_hash: row.get("password_hash"),
        role: Role::parse(&role).map_err(decode_err)?,
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
    })
}

const USER_COLUMNS: &str = "id, email, password_hash, role, first_name, last_name";

pub struct UserRepo<'a> {
    db: &'a FailoverPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(db: &'a FailoverPool) -> Self {
        Self { db }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<UserRow>, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<UserRow>, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query("SELECT id FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    /// True when `email` belongs to a user other than `user_id`.
    pub async fn email_taken_by_other(&self, email: &str, user_id: i64) -> Result<bool, DbError> {
        let pool = self.db.read().await?;
        let row = sqlx::query("SELECT id FROM users WHERE email = $1 AND id <> $2")
            .bind(email)
            .bind(user_id)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        role: Role,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<UserRow, DbError> {
        let pool = self.db.write().await?;
        let row = sqlx::query(&format!(
            "INSERT INTO users (email, password_hash, role, first_name, last_name)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(email)
        .bind(password_hash)
        .bind(role.as_str())
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await?;
        user_from_row(&row)
    }

    /// Partial update; unset fields keep their current value. Returns the
    /// fresh row, or None when the user is gone.
    pub async fn update(
        &self,
        id: i64,
        email: Option<&str>,
        password_hash: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
    ) -> Result<Option<UserRow>, DbError> {
        let pool = self.db.write().await?;
        let row = sqlx::query(&format!(
            "UPDATE users SET
                email = COALESCE($2, email),
                password_hash = COALESCE($3, password_hash),
                first_name = COALESCE($4, first_name),
                last_name = COALESCE($5, last_name)
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id)
        .bind(email)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(pool)
        .await?;
        row.as_ref().map(user_from_row).transpose()
    }
}
