//! Argon2id password hashing

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};

use crate::models::Password;

use super::AuthError;

/// Hash a password with Argon2id and a fresh random salt.
///
/// The output is a PHC string (`$argon2id$...`) that carries its own
/// salt and parameters, so verification needs nothing else.
pub fn hash_password(password: &Password) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_str().as_bytes(), &salt)
        .map_err(|e| AuthError::Hash(e.to_string()))?;

    Ok(hash.to_string())
}

/// Check a candidate password against a stored PHC hash.
///
/// Returns `Ok(false)` for a wrong password; `Err` only when the stored
/// hash itself cannot be parsed.
pub fn verify_password(candidate: &str, stored_hash: &str) -> Result<bool, AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;

    Ok(Argon2::default()
        .verify_password(candidate.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trip() {
        let password = Password::new("correct horse battery").expect("valid password");
        let hash = hash_password(&password).expect("hashing failed");

        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password("correct horse battery", &hash).expect("verify failed"));
        assert!(!verify_password("wrong horse", &hash).expect("verify failed"));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let password = Password::new("correct horse battery").expect("valid password");
        let first = hash_password(&password).expect("hashing failed");
        let second = hash_password(&password).expect("hashing failed");

        assert_ne!(first, second);
    }

    #[test]
    fn garbage_stored_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-phc-string").is_err());
    }
}
