//! Profile business rules.
//!
//! An update re-signs the session token because the token payload doubles
//! as the client's cached profile.

use enroll_core::models::validation::validate_email;
use enroll_core::models::UserPublic;
use enroll_core::password;
use enroll_core::rpc::messages::{UpdateProfileRequest, UpdateProfileResponse};
use enroll_core::ServiceError;

use crate::repo::UserRepo;

use super::ProfileState;

pub async fn get_profile(state: &ProfileState, user_id: i64) -> Result<UserPublic, ServiceError> {
    UserRepo::new(&state.db)
        .find_by_id(user_id)
        .await?
        .map(|row| row.public())
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))
}

pub async fn update_profile(
    state: &ProfileState,
    req: UpdateProfileRequest,
) -> Result<UpdateProfileResponse, ServiceError> {
    if req.email.is_none()
        && req.password.is_none()
        && req.first_name.is_none()
        && req.last_name.is_none()
    {
        return Err(ServiceError::validation(
            "Provide at least one field to update",
        ));
    }

    if let Some(password) = &req.password {
        if password.len() < 8 {
            return Err(ServiceError::validation(
                "Password must be at least 8 characters",
            ));
        }
    }
    if let Some(email) = &req.email {
        if validate_email(email).is_err() {
            return Err(ServiceError::validation("Invalid email format"));
        }
    }

    let repo = UserRepo::new(&state.db);
    let existing = repo
        .find_by_id(req.user_id)
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

    if let Some(email) = &req.email {
        if *email != existing.email && repo.email_taken_by_other(email, existing.id).await? {
            return Err(ServiceError::Conflict("Email already in use".into()));
        }
    }

    let password_hash = match &req.password {
        Some(password) => Some(password::hash(password).map_err(|_| ServiceError::Internal)?),
        None => None,
    };

    let updated = repo
        .update(
            req.user_id,
            req.email.as_deref(),
            password_hash.as_deref(),
            req.first_name.as_deref(),
            req.last_name.as_deref(),
        )
        .await?
        .ok_or_else(|| ServiceError::NotFound("User not found".into()))?;

    let user = updated.public();
    let token = state.keys.sign(&user).map_err(|_| ServiceError::Internal)?;

    tracing::info!(user_id = user.id, "profile updated");
    Ok(UpdateProfileResponse { user, token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use enroll_core::config::DbConfig;
    use enroll_core::token::TokenKeys;
    use enroll_core::FailoverPool;

    fn state() -> ProfileState {
        let db = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        ProfileState::new(
            db,
            Arc::new(TokenKeys::new("test-secret")),
            "http://localhost:4001".into(),
        )
    }

    fn empty_update(user_id: i64) -> UpdateProfileRequest {
        UpdateProfileRequest {
            user_id,
            email: None,
            password: None,
            first_name: None,
            last_name: None,
        }
    }

    #[tokio::test]
    async fn update_needs_at_least_one_field() {
        let err = update_profile(&state(), empty_update(1)).await.unwrap_err();
        assert_eq!(err.to_string(), "Provide at least one field to update");
    }

    #[tokio::test]
    async fn short_password_is_rejected_before_any_lookup() {
        let mut req = empty_update(1);
        req.password = Some("short".into());
        let err = update_profile(&state(), req).await.unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters");
    }

    #[tokio::test]
    async fn bad_email_is_rejected_before_any_lookup() {
        let mut req = empty_update(1);
        req.email = Some("not-an-email".into());
        let err = update_profile(&state(), req).await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid email format");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_re_signs_the_token() {
        use enroll_core::models::Role;

        let state = state();
        crate::schema::ensure_schema(state.db.primary())
            .await
            .unwrap();
        let email = format!("prof-{}@test.local", std::process::id());

        let created = UserRepo::new(&state.db)
            .create(&email, "$argon2id$fake", Role::Student, Some("Ada"), None)
            .await
            .unwrap();

        let mut req = empty_update(created.id);
        req.first_name = Some("Grace".into());
        let resp = update_profile(&state, req).await.unwrap();
        assert_eq!(resp.user.first_name, "Grace");

        let claims = state.keys.verify(&resp.token).unwrap();
        assert_eq!(claims.first_name, "Grace");
        assert_eq!(claims.user_id, created.id);
    }
}
