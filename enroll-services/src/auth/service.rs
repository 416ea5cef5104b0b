//! Auth business rules, shared by the HTTP and RPC handlers.

use enroll_core::models::{Role, UserPublic};
use enroll_core::password;
use enroll_core::rpc::messages::{LoginRequest, LoginResponse, RegisterRequest};
use enroll_core::token::Claims;
use enroll_core::ServiceError;

use crate::repo::UserRepo;

use super::AuthState;

pub async fn login(state: &AuthState, req: LoginRequest) -> Result<LoginResponse, ServiceError> {
    if req.email.is_empty() || req.password.is_empty() {
        return Err(ServiceError::validation("Email and password are required"));
    }

    // Unknown email and wrong password share one message so accounts
    // cannot be enumerated.
    let user = UserRepo::new(&state.db)
        .find_by_email(&req.email)
        .await?
        .ok_or_else(|| ServiceError::Unauthenticated("Invalid credentials".into()))?;

    if !password::verify(&req.password, &user.password_hash) {
        return Err(ServiceError::Unauthenticated("Invalid credentials".into()));
    }

    let user = user.public();
    let token = state.keys.sign(&user).map_err(|_| ServiceError::Internal)?;

    tracing::info!(user_id = user.id, "user logged in");
    Ok(LoginResponse { token, user })
}

pub async fn register(state: &AuthState, req: RegisterRequest) -> Result<UserPublic, ServiceError> {
    if req.email.is_empty() || req.password.is_empty() || req.role.is_empty() {
        return Err(ServiceError::validation(
            "Email, password, and role are required",
        ));
    }
    let role = Role::parse(&req.role)
        .map_err(|_| ServiceError::validation("Role must be either student or faculty"))?;

    let repo = UserRepo::new(&state.db);
    if repo.email_exists(&req.email).await? {
        return Err(ServiceError::Conflict("User already exists".into()));
    }

    let hash = password::hash(&req.password).map_err(|_| ServiceError::Internal)?;
    let created = repo
        .create(
            &req.email,
            &hash,
            role,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
        )
        .await?;

    tracing::info!(user_id = created.id, role = %role, "user registered");
    Ok(created.public())
}

pub fn validate_token(state: &AuthState, token: &str) -> Result<Claims, ServiceError> {
    state
        .keys
        .verify(token)
        .map_err(|_| ServiceError::Unauthenticated("Invalid or expired token".into()))
}
