//! Signed, time-limited auth tokens.
//!
//! The token payload doubles as the client's cached profile, so it carries
//! the full public user shape. Profile updates re-sign so the cache stays
//! consistent.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::{Role, UserPublic};

const TOKEN_TTL_HOURS: i64 = 24;

#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,

    #[error("token signing failed")]
    Signing,
}

/// Claims carried by every token. Field names are camelCase on the wire;
/// the frontend reads them directly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claims {
    pub user_id: i64,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub exp: i64,
}

impl Claims {
    pub fn user(&self) -> UserPublic {
        UserPublic {
            id: self.user_id,
            email: self.email.clone(),
            role: self.role,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
        }
    }
}

/// HS256 key pair derived from the shared secret.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl TokenKeys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    pub fn sign(&self, user: &UserPublic) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: user.id,
            email: user.email.clone(),
            role: user.role,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            exp: (Utc::now() + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
        };
        jsonwebtoken::encode(&Header::default(), &claims, &self.encoding)
            .map_err(|_| TokenError::Signing)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> UserPublic {
        UserPublic {
            id: 42,
            email: "a@x.com".into(),
            role: Role::Student,
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        }
    }

    #[test]
    fn sign_then_verify() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.sign(&sample_user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.role, Role::Student);
        assert_eq!(claims.first_name, "Ada");
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn wrong_secret_fails() {
        let keys = TokenKeys::new("test-secret");
        let token = keys.sign(&sample_user()).unwrap();
        let other = TokenKeys::new("different-secret");
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_fails() {
        let keys = TokenKeys::new("test-secret");
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }

    #[test]
    fn claims_use_camel_case() {
        let keys = TokenKeys::new("s");
        let token = keys.sign(&sample_user()).unwrap();
        let claims = keys.verify(&token).unwrap();
        let v = serde_json::to_value(&claims).unwrap();
        assert!(v.get("userId").is_some());
        assert!(v.get("firstName").is_some());
        assert!(v.get("user_id").is_none());
    }
}
