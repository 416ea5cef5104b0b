//! Password hashing (argon2id).

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed")]
pub struct HashError;

pub fn hash(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| HashError)
}

/// Constant-time verify; any parse failure counts as a mismatch.
pub fn verify(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let h = hash("Abcdef12").unwrap();
        assert!(h.starts_with("$argon2"));
        assert!(verify("Abcdef12", &h));
        assert!(!verify("wrong-password", &h));
    }

    #[test]
    fn distinct_salts() {
        let a = hash("Abcdef12").unwrap();
        let b = hash("Abcdef12").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_hash_is_mismatch() {
        assert!(!verify("Abcdef12", "not-a-hash"));
    }
}
