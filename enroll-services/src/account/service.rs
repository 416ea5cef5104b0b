//! Student account creation with the per-field validator chain.

use serde_json::json;

use enroll_core::models::validation::{
    validate_email, validate_name, validate_password, ValidationError,
};
use enroll_core::models::Role;
use enroll_core::password;
use enroll_core::rpc::messages::{CreateStudentRequest, CreateStudentResponse};
use enroll_core::ServiceError;

use crate::repo::UserRepo;

use super::AccountState;

/// One `{field, message}` entry per failed rule, phrased for the form UI.
fn detail(field: &'static str, label: &str, err: &ValidationError) -> serde_json::Value {
    let message = match err {
        ValidationError::Empty { .. } => format!("{label} is required"),
        ValidationError::TooShort { min, .. } => {
            format!("{label} must be at least {min} characters")
        }
        ValidationError::TooLong { max, .. } => {
            format!("{label} must be less than {max} characters")
        }
        ValidationError::InvalidFormat { field: "email", .. } => "Invalid email format".into(),
        ValidationError::InvalidFormat { reason, .. } => format!("{label} {reason}"),
        ValidationError::InvalidVariant { value, .. } => {
            format!("invalid {label} value: '{value}'")
        }
    };
    json!({ "field": field, "message": message })
}

fn validate(req: &CreateStudentRequest) -> Result<(), ServiceError> {
    let mut details = Vec::new();

    if let Err(e) = validate_email(&req.email) {
        details.push(detail("email", "Email", &e));
    }
    if let Err(e) = validate_password(&req.password) {
        details.push(detail("password", "Password", &e));
    }
    if let Some(name) = &req.first_name {
        if let Err(e) = validate_name("firstName", name) {
            details.push(detail("firstName", "First name", &e));
        }
    }
    if let Some(name) = &req.last_name {
        if let Err(e) = validate_name("lastName", name) {
            details.push(detail("lastName", "Last name", &e));
        }
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation {
            message: "Validation failed".into(),
            details: Some(json!(details)),
        })
    }
}

pub async fn create_student(
    state: &AccountState,
    req: CreateStudentRequest,
) -> Result<CreateStudentResponse, ServiceError> {
    validate(&req)?;

    let repo = UserRepo::new(&state.db);
    if repo.email_exists(&req.email).await? {
        return Err(ServiceError::Conflict("User already exists".into()));
    }

    let hash = password::hash(&req.password).map_err(|_| ServiceError::Internal)?;
    let created = repo
        .create(
            &req.email,
            &hash,
            Role::Student,
            req.first_name.as_deref(),
            req.last_name.as_deref(),
        )
        .await?;

    let user = created.public();
    let token = state.keys.sign(&user).map_err(|_| ServiceError::Internal)?;

    tracing::info!(user_id = user.id, "student account created");
    Ok(CreateStudentResponse { user, token })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use enroll_core::config::DbConfig;
    use enroll_core::token::TokenKeys;
    use enroll_core::FailoverPool;

    fn state() -> AccountState {
        let db = FailoverPool::connect(&DbConfig::from_env()).unwrap();
        AccountState::new(db, Arc::new(TokenKeys::new("test-secret")))
    }

    fn request(email: &str, password: &str) -> CreateStudentRequest {
        CreateStudentRequest {
            email: email.into(),
            password: password.into(),
            first_name: Some("Ada".into()),
            last_name: Some("Lovelace".into()),
        }
    }

    #[tokio::test]
    async fn weak_password_yields_field_details() {
        let err = create_student(&state(), request("a@x.com", "short"))
            .await
            .unwrap_err();
        let ServiceError::Validation { message, details } = err else {
            panic!("expected validation error");
        };
        assert_eq!(message, "Validation failed");
        let details = details.unwrap();
        assert_eq!(details[0]["field"], "password");
        assert_eq!(
            details[0]["message"],
            "Password must be at least 8 characters"
        );
    }

    #[tokio::test]
    async fn collects_every_failing_field() {
        let mut req = request("not-an-email", "Abcdef12");
        req.first_name = Some("R2D2".into());
        let err = create_student(&state(), req).await.unwrap_err();
        let ServiceError::Validation { details, .. } = err else {
            panic!("expected validation error");
        };
        let details = details.unwrap();
        let fields: Vec<_> = details
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["field"].as_str().unwrap().to_owned())
            .collect();
        assert_eq!(fields, ["email", "firstName"]);
        assert_eq!(details[0]["message"], "Invalid email format");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn created_student_gets_a_token() {
        let state = state();
        crate::schema::ensure_schema(state.db.primary())
            .await
            .unwrap();
        let email = format!("acct-{}@test.local", std::process::id());

        let resp = create_student(&state, request(&email, "Abcdef12"))
            .await
            .unwrap();
        assert_eq!(resp.user.role, Role::Student);
        let claims = state.keys.verify(&resp.token).unwrap();
        assert_eq!(claims.user_id, resp.user.id);

        let err = create_student(&state, request(&email, "Abcdef12"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "User already exists");
    }
}
